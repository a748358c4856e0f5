//! Interactive plot rendering via egui.
//!
//! See [`PlotRenderer`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use verhulst_core::Trace;

use crate::render::{RenderOptions, Renderer};

/// Renders every captured series of a trace as a line in an interactive
/// egui window.
///
/// The destination names the native window; the options title is drawn above
/// the plot. The call blocks until the window is closed.
///
/// # Example
///
/// ```ignore
/// use verhulst_observers::{PlotRenderer, RenderOptions, Renderer};
///
/// PlotRenderer::new().render(
///     &trace,
///     "logistic",
///     &RenderOptions::new("Logistic growth: dx/dt = g·x·(1 − x/k)").legend(),
/// )?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotRenderer;

impl PlotRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PlotRenderer {
    type Error = eframe::Error;

    fn render(
        &self,
        trace: &Trace,
        destination: &str,
        options: &RenderOptions,
    ) -> Result<(), eframe::Error> {
        let series: Vec<(String, Vec<[f64; 2]>)> = trace
            .captures()
            .iter()
            .map(|name| (name.clone(), trace.series(name).unwrap_or_default()))
            .collect();

        let app = PlotApp {
            title: options.title().to_string(),
            legend: options.legend_enabled(),
            series,
        };

        eframe::run_native(
            destination,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
    }
}

/// The egui [`eframe::App`] that draws the captured series.
struct PlotApp {
    title: String,
    legend: bool,
    series: Vec<(String, Vec<[f64; 2]>)>,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);

            let mut plot = Plot::new("trace");
            if self.legend {
                plot = plot.legend(Legend::default());
            }

            plot.show(ui, |plot_ui| {
                for (name, points) in &self.series {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}
