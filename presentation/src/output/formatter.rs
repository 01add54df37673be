//! Output formatter trait

/// Anything that can be shown in the terminal as formatted text
pub trait ConsoleRender {
    /// Title printed above the rendered body
    fn title(&self) -> String;

    /// Render the body, without the title banner
    fn render(&self) -> String;
}
