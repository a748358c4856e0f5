//! The rendering collaborator interface.
//!
//! See [`Renderer`] and [`RenderOptions`] for usage.

use verhulst_core::Trace;

/// Options a renderer honors when producing a figure.
///
/// Construct with [`RenderOptions::new`] and chain builder methods as
/// needed.
///
/// # Example
///
/// ```
/// use verhulst_observers::RenderOptions;
///
/// let options = RenderOptions::new("Logistic growth").legend();
/// assert_eq!(options.title(), "Logistic growth");
/// assert!(options.legend_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    title: String,
    legend: bool,
}

impl RenderOptions {
    /// Creates options with the given human-readable title and no legend.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            legend: false,
        }
    }

    /// Enables a legend labeling each captured series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// The figure title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether a legend was requested.
    #[must_use]
    pub fn legend_enabled(&self) -> bool {
        self.legend
    }
}

/// Turns a completed [`Trace`] into a figure.
///
/// The destination is pass-through metadata: a window name, a file name, or
/// whatever else identifies the backend's output. Renderers own all I/O and
/// image encoding; the solver side only produces the trace.
pub trait Renderer {
    /// The backend's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Renders every captured series in `trace` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the figure cannot be produced.
    fn render(
        &self,
        trace: &Trace,
        destination: &str,
        options: &RenderOptions,
    ) -> Result<(), Self::Error>;
}
