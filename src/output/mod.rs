/// Writes the rendered policy module to disk.
pub mod formatter;
/// Renders policy statements into the `Casbin` module text.
pub mod renderer;
