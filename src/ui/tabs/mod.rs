// Form tab module registry.
// - Each tab module owns only its own rendering behavior.
pub mod github;
pub mod manual;
