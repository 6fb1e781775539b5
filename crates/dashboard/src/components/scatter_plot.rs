//! Server-side layout for the batch scatter plot.
//!
//! Points are placed by manufacturing date (x) and system quantity (y) in SVG
//! user units. The template only draws what this module computes.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use soh_allocations_core::BatchView;

use crate::filters::format_quantity;

pub const WIDTH: f64 = 760.0;
pub const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 56.0;
const POINT_RADIUS: f64 = 10.0;
const TICK_COUNT: u32 = 5;
/// Days added either side when every batch shares one date.
const SINGLE_DATE_PADDING_DAYS: i64 = 15;

/// One plotted batch.
#[derive(Debug, Clone, Serialize)]
pub struct PlotPoint {
    /// Position in the displayed rows; posted back as a highlight index.
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub tooltip: String,
}

/// An axis tick and where its label sits.
#[derive(Debug, Clone, Serialize)]
pub struct AxisTick {
    pub pos: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

/// Complete plot layout.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterPlot {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Midpoints of the plot area, for the axis titles.
    pub center_x: f64,
    pub center_y: f64,
    /// Baseline of the x axis title.
    pub x_title_y: f64,
    pub points: Vec<PlotPoint>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl ScatterPlot {
    /// Lay out `batches` in display order.
    #[must_use]
    pub fn layout(batches: &[BatchView]) -> Self {
        let left = MARGIN_LEFT;
        let right = WIDTH - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = HEIGHT - MARGIN_BOTTOM;
        let center_x = round1((left + right) / 2.0);
        let center_y = round1((top + bottom) / 2.0);

        let Some((start, end)) = date_domain(batches) else {
            return Self {
                width: WIDTH,
                height: HEIGHT,
                left,
                right,
                top,
                bottom,
                center_x,
                center_y,
                x_title_y: bottom + 40.0,
                points: Vec::new(),
                x_ticks: Vec::new(),
                y_ticks: Vec::new(),
            };
        };
        let span_days = to_f64((end - start).num_days()).max(1.0);
        let max_qty = qty_ceiling(batches);

        let x_for = |date: NaiveDate| {
            left + (right - left) * to_f64((date - start).num_days()) / span_days
        };
        let y_for = |qty: f64| bottom - (bottom - top) * qty / max_qty;

        let points = batches
            .iter()
            .enumerate()
            .map(|(index, batch)| PlotPoint {
                index,
                cx: round1(x_for(batch.man_date)),
                cy: round1(y_for(batch.system_qty.to_f64().unwrap_or(0.0))),
                r: POINT_RADIUS,
                fill: batch.fill_color.as_str(),
                stroke: batch.line_color.as_str(),
                tooltip: tooltip(batch),
            })
            .collect();

        let x_ticks = (0..=TICK_COUNT)
            .map(|step| {
                let offset = span_days * f64::from(step) / f64::from(TICK_COUNT);
                let date = start
                    .checked_add_signed(Duration::days(offset.round().to_i64().unwrap_or(0)))
                    .unwrap_or(end);
                let pos = round1(x_for(date));
                AxisTick {
                    pos,
                    label: date.format("%Y-%m-%d").to_string(),
                    label_x: pos,
                    label_y: bottom + 18.0,
                }
            })
            .collect();

        let y_ticks = (0..=TICK_COUNT)
            .map(|step| {
                let qty = max_qty * f64::from(step) / f64::from(TICK_COUNT);
                let pos = round1(y_for(qty));
                AxisTick {
                    pos,
                    label: format_quantity(&format!("{qty:.0}")),
                    label_x: left - 8.0,
                    label_y: pos + 4.0,
                }
            })
            .collect();

        Self {
            width: WIDTH,
            height: HEIGHT,
            left,
            right,
            top,
            bottom,
            center_x,
            center_y,
            x_title_y: bottom + 40.0,
            points,
            x_ticks,
            y_ticks,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Earliest and latest date, padded when they coincide.
///
/// Padding that would leave the calendar range is skipped on that side.
fn date_domain(batches: &[BatchView]) -> Option<(NaiveDate, NaiveDate)> {
    let min = batches.iter().map(|b| b.man_date).min()?;
    let max = batches.iter().map(|b| b.man_date).max()?;
    if min == max {
        let pad = Duration::days(SINGLE_DATE_PADDING_DAYS);
        return Some((
            min.checked_sub_signed(pad).unwrap_or(min),
            max.checked_add_signed(pad).unwrap_or(max),
        ));
    }
    Some((min, max))
}

/// Top of the y axis: the largest quantity plus headroom, never zero.
fn qty_ceiling(batches: &[BatchView]) -> f64 {
    let max = batches
        .iter()
        .map(|b| b.system_qty)
        .max()
        .unwrap_or(Decimal::ZERO)
        .to_f64()
        .unwrap_or(0.0);
    if max <= 0.0 { 1.0 } else { (max * 1.1).ceil() }
}

fn tooltip(batch: &BatchView) -> String {
    format!(
        "Manufacturing Date: {}\nReserved Qty: {}\nSystem Qty: {}\nAvailable Qty: {}\nBDC: {}\nBatch: {}\nSales: {}",
        batch.man_date.format("%Y-%m-%d"),
        format_quantity(&batch.reserved_qty.to_string()),
        format_quantity(&batch.system_qty.to_string()),
        format_quantity(&batch.avail_qty.to_string()),
        batch.bdc,
        batch.batch,
        batch.sales,
    )
}

fn to_f64(days: i64) -> f64 {
    days.to_f64().unwrap_or(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
