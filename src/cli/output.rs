//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::gauge::geometry::{ArcDescriptor, Point, Rect, Size};
use crate::gauge::layout::LayoutCache;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// One named circle of the layout
#[derive(Debug, Clone, Serialize)]
pub struct RingEntry {
    pub name: &'static str,
    pub radius: i32,
    pub x: i32,
    pub y: i32,
}

impl RingEntry {
    fn new(name: &'static str, arc: &ArcDescriptor) -> Self {
        Self {
            name,
            radius: arc.radius(),
            x: arc.x_offset(),
            y: arc.y_offset(),
        }
    }
}

/// One tick of the scale
#[derive(Debug, Clone, Serialize)]
pub struct TickEntry {
    pub percent: u32,
    pub angle: f32,
    pub from: Point,
    pub to: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Layout command result
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub surface: Size,
    pub range: String,
    pub inverted: bool,
    pub center: Point,
    pub rings: Vec<RingEntry>,
    pub value_box: Rect,
    pub labels: Vec<String>,
    pub optimal: Size,
    pub fits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Vec<TickEntry>>,
}

impl LayoutReport {
    /// Summarize a computed layout
    pub fn from_layout(
        layout: &LayoutCache,
        surface: Size,
        range: String,
        inverted: bool,
        optimal: Size,
        with_ticks: bool,
    ) -> Self {
        let ticks = with_ticks.then(|| {
            layout
                .ticks
                .iter()
                .map(|t| TickEntry {
                    percent: t.percent,
                    angle: t.angle,
                    from: t.from,
                    to: t.to,
                    label: t.label.as_ref().map(|l| l.text.clone()),
                })
                .collect()
        });

        Self {
            surface,
            range,
            inverted,
            center: layout.center,
            rings: vec![
                RingEntry::new("outer", &layout.outer),
                RingEntry::new("inner", &layout.inner),
                RingEntry::new("tick_start", &layout.line_start),
                RingEntry::new("tick_short", &layout.line_short),
                RingEntry::new("tick_long", &layout.line_long),
                RingEntry::new("label", &layout.line_label),
            ],
            value_box: layout.value_box,
            labels: layout
                .long_ticks()
                .filter_map(|t| t.label.as_ref().map(|l| l.text.clone()))
                .collect(),
            optimal,
            fits: optimal.width <= surface.width && optimal.height <= surface.height,
            ticks,
        }
    }
}

impl TableDisplay for LayoutReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Surface: {}x{}  Range: {}{}\n",
            self.surface.width,
            self.surface.height,
            self.range,
            if self.inverted { " (inverted)" } else { "" }
        );
        output.push_str(&format!("Center: ({}, {})\n", self.center.x, self.center.y));
        for ring in &self.rings {
            output.push_str(&format!(
                "  {:<10} r={:<4} at ({}, {})\n",
                ring.name, ring.radius, ring.x, ring.y
            ));
        }
        output.push_str(&format!(
            "Value box: {}x{} at ({}, {})\n",
            self.value_box.width, self.value_box.height, self.value_box.x, self.value_box.y
        ));
        output.push_str(&format!("Labels: {}\n", self.labels.join(" ")));
        output.push_str(&format!(
            "Optimal size: {}x{} ({})",
            self.optimal.width,
            self.optimal.height,
            if self.fits { "fits" } else { "does not fit" }
        ));

        if let Some(ticks) = &self.ticks {
            output.push('\n');
            for tick in ticks {
                output.push_str(&format!(
                    "\n  {:>3}% {:>7.1}° ({}, {}) -> ({}, {}){}",
                    tick.percent,
                    tick.angle,
                    tick.from.x,
                    tick.from.y,
                    tick.to.x,
                    tick.to.y,
                    tick.label
                        .as_ref()
                        .map(|l| format!("  [{}]", l))
                        .unwrap_or_default()
                ));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}x{} r={} box={}x{} optimal={}x{}",
            self.surface.width,
            self.surface.height,
            self.rings.first().map(|r| r.radius).unwrap_or(0),
            self.value_box.width,
            self.value_box.height,
            self.optimal.width,
            self.optimal.height
        )
    }
}

/// One sampled frame of a transition
#[derive(Debug, Clone, Serialize)]
pub struct FrameEntry {
    pub elapsed_ms: u64,
    pub value: i32,
    pub finished: bool,
}

/// Animate command result
#[derive(Debug, Clone, Serialize)]
pub struct AnimationReport {
    pub from: i32,
    pub to: i32,
    pub duration_ms: u64,
    pub easing: String,
    pub frames: Vec<FrameEntry>,
}

impl TableDisplay for AnimationReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} -> {} over {} ms ({})\n",
            self.from, self.to, self.duration_ms, self.easing
        );
        for frame in &self.frames {
            output.push_str(&format!(
                "  {:>6} ms  {}{}\n",
                frame.elapsed_ms,
                frame.value,
                if frame.finished { "  (done)" } else { "" }
            ));
        }
        output
    }

    fn to_compact(&self) -> String {
        self.frames
            .iter()
            .map(|f| f.value.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A reading applied to the headless gauge
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEntry {
    pub update: u32,
    pub value: i32,
    pub range: String,
    /// Animation frames ticked since the previous reading
    pub frames: u32,
}

impl TableDisplay for UpdateEntry {
    fn to_table(&self) -> String {
        format!(
            "[{}] {} W (range {}, {} frames)",
            self.update, self.value, self.range, self.frames
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.update, self.value)
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}
