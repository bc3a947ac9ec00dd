//! Registries configured from settings files and the environment.

use routeset::conf::RoutesSettings;
use routeset::prelude::*;
use routeset_integration_tests::{full_viewset, product, rendered, seeded_store};
use rstest::rstest;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn registry_with(settings: RoutesSettings) -> Registry {
	let mut registry = Registry::builder("admin").settings(settings).build().unwrap();
	let viewset = full_viewset(&registry, seeded_store()).build().unwrap();
	registry.register(viewset).unwrap();
	registry
}

#[rstest]
#[tokio::test]
async fn test_settings_file_drives_mount_path_and_site_context() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("routes.toml");
	fs::write(
		&path,
		r#"
mount_path = "/backoffice/"
site_title = "Shop admin"
index_title = "Dashboard"
"#,
	)
	.unwrap();
	let settings = RoutesSettings::from_file(&path).unwrap();
	let registry = registry_with(settings);

	// Act
	let response = registry.dispatch(Request::get("/backoffice/")).await.unwrap();

	// Assert
	let body = rendered(&response);
	assert_eq!(body["context"]["site_title"], "Shop admin");
	assert_eq!(body["context"]["title"], "Dashboard");
	assert_eq!(body["context"]["site_url"], "/backoffice/");
	assert_eq!(
		registry.object_url(&product(), &Action::Delete, &["1"]).unwrap(),
		"/backoffice/product/delete/1/"
	);
	assert!(registry.resolve("/product/").unwrap().is_none());
}

#[rstest]
fn test_disabled_index_removes_index_route() {
	let settings = RoutesSettings {
		index_enabled: false,
		..Default::default()
	};
	let registry = registry_with(settings);

	let urls = registry.urls().unwrap();
	assert_eq!(urls[0].name(), Some("admin_shop_product_index"));
	assert!(registry.each_context().unwrap()["site_url"].is_null());
}

#[rstest]
#[serial(routeset_env)]
fn test_environment_overrides_settings_file() {
	// Arrange
	let dir = TempDir::new().unwrap();
	let path = dir.path().join("routes.toml");
	fs::write(&path, "mount_path = \"/from-file/\"\nsite_header = \"From file\"\n").unwrap();
	// SAFETY: serialized with every other test touching ROUTESET_* variables
	unsafe {
		std::env::set_var("ROUTESET_MOUNT_PATH", "/from-env/");
	}

	// Act
	let settings = RoutesSettings::load(Some(path.as_path()));
	// SAFETY: as above
	unsafe {
		std::env::remove_var("ROUTESET_MOUNT_PATH");
	}

	// Assert
	let settings = settings.unwrap();
	assert_eq!(settings.mount_path, "/from-env/");
	assert_eq!(settings.site_header, "From file");
}

#[rstest]
#[case("admin/")]
#[case("/admin")]
fn test_malformed_mount_path_is_rejected_by_the_builder(#[case] mount_path: &str) {
	let settings = RoutesSettings {
		mount_path: mount_path.to_string(),
		..Default::default()
	};
	let err = Registry::builder("admin").settings(settings).build().unwrap_err();
	assert!(err.is_configuration());
}
