// Each test file in registry/ is included with a #[path] attribute

#[path = "registry/routes_integration.rs"]
mod routes_integration;

#[path = "registry/hooks_integration.rs"]
mod hooks_integration;

#[path = "registry/settings_integration.rs"]
mod settings_integration;

#[path = "registry/views_integration.rs"]
mod views_integration;

#[path = "registry/delete_integration.rs"]
mod delete_integration;
