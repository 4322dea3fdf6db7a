pub mod info_panel;

// Re-exports for convenience
pub use info_panel::info_panel;
