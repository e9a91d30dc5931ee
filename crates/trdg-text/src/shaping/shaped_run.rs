/// A run of text shaped with a single font.
#[derive(Debug, Clone)]
pub struct ShapedRun {
    /// Total advance width of the run in pixels.
    pub width: f32,
}
