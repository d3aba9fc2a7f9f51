//! Relationship graph: the target at the centre, one satellite per
//! connection.
//!
//! Node radius and edge width grow with connection strength. Placement is a
//! deterministic radial layout; interactive force layout is left to whatever
//! displays the SVG.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write as _;

use gt_core::Connection;
use serde::Serialize;

use crate::html::escape_html;

/// Radius of the target node.
pub const CENTER_RADIUS: f64 = 25.0;
/// Satellite radius before the strength bonus.
pub const SATELLITE_BASE_RADIUS: f64 = 15.0;

const CENTER_FILL: &str = "#00f0ff";
const SATELLITE_FILL: &str = "#2a2a40";
const SATELLITE_STROKE: &str = "#00ff9d";
const EDGE_STROKE: &str = "#3d3d5c";
const LABEL_FILL: &str = "#e0e0e0";
const MIN_ORBIT: f64 = 60.0;

/// `15 + strength / 2`.
#[must_use]
pub fn satellite_radius(strength: u8) -> f64 {
    SATELLITE_BASE_RADIUS + f64::from(strength) / 2.0
}

/// `sqrt(strength) * 2`.
#[must_use]
pub fn edge_width(strength: u8) -> f64 {
    f64::from(strength).sqrt() * 2.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub is_center: bool,
}

/// An edge from the centre to `satellites[target]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub target: usize,
    pub width: f64,
    pub strength: u8,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphModel {
    pub width: u32,
    pub height: u32,
    pub center: GraphNode,
    pub satellites: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    /// Lay out `connections` around `target` on a `width` × `height` canvas.
    #[must_use]
    pub fn build(target: &str, connections: &[Connection], width: u32, height: u32) -> Self {
        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        let largest = connections
            .iter()
            .map(|c| satellite_radius(c.strength))
            .fold(SATELLITE_BASE_RADIUS, f64::max);
        // Distance the largest satellite can sit from the centre and stay on canvas.
        let room = (cx.min(cy) - largest).max(0.0);
        let orbit = (room - 10.0).max(MIN_ORBIT.min(room));

        #[allow(clippy::cast_precision_loss)]
        let count = connections.len() as f64;
        let satellites = connections
            .iter()
            .enumerate()
            .map(|(i, c)| {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * (i as f64) / count - FRAC_PI_2;
                GraphNode {
                    label: c.name.clone(),
                    radius: satellite_radius(c.strength),
                    x: orbit.mul_add(angle.cos(), cx),
                    y: orbit.mul_add(angle.sin(), cy),
                    is_center: false,
                }
            })
            .collect();
        let edges = connections
            .iter()
            .enumerate()
            .map(|(i, c)| GraphEdge {
                target: i,
                width: edge_width(c.strength),
                strength: c.strength,
                relation: c.role_or_relation.clone(),
            })
            .collect();

        Self {
            width,
            height,
            center: GraphNode {
                label: target.to_string(),
                radius: CENTER_RADIUS,
                x: cx,
                y: cy,
                is_center: true,
            },
            satellites,
            edges,
        }
    }

    /// Render as a standalone SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="JetBrains Mono, monospace">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(svg, r#"  <g stroke="{EDGE_STROKE}" stroke-opacity="0.6">"#);
        for edge in &self.edges {
            if let Some(node) = self.satellites.get(edge.target) {
                let _ = writeln!(
                    svg,
                    r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke-width="{:.2}"><title>{}</title></line>"#,
                    self.center.x,
                    self.center.y,
                    node.x,
                    node.y,
                    edge.width,
                    escape_html(&edge.relation)
                );
            }
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g stroke-width=\"1.5\">\n");
        for node in std::iter::once(&self.center).chain(&self.satellites) {
            let (fill, stroke) = if node.is_center {
                (CENTER_FILL, CENTER_FILL)
            } else {
                (SATELLITE_FILL, SATELLITE_STROKE)
            };
            let _ = writeln!(
                svg,
                r#"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{fill}" stroke="{stroke}"/>"#,
                node.x, node.y, node.radius
            );
        }
        svg.push_str("  </g>\n");

        let _ = writeln!(svg, r#"  <g fill="{LABEL_FILL}" pointer-events="none">"#);
        for node in std::iter::once(&self.center).chain(&self.satellites) {
            let size = if node.is_center { 14 } else { 12 };
            let _ = writeln!(
                svg,
                r#"    <text x="{:.1}" y="{:.1}" dx="15" dy="4" font-size="{size}px">{}</text>"#,
                node.x,
                node.y,
                escape_html(&node.label)
            );
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}
