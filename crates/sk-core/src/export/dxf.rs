//! DXF text generation

use glam::DVec2;

use super::ExportOptions;
use super::document::{InterchangeDocument, Primitive};

/// First entity handle; lower handles are left to header objects
const FIRST_HANDLE: u32 = 0x100;

/// Internal function to generate the DXF document text
pub fn generate_dxf_string(document: &InterchangeDocument, options: &ExportOptions) -> String {
    let mut dxf = String::new();

    // Header
    push_group(&mut dxf, 0, "SECTION");
    push_group(&mut dxf, 2, "HEADER");
    push_group(&mut dxf, 9, "$ACADVER");
    push_group(&mut dxf, 1, "AC1015");
    push_group(&mut dxf, 9, "$INSUNITS");
    push_group(&mut dxf, 70, "4");
    push_group(&mut dxf, 0, "ENDSEC");

    // Entities
    push_group(&mut dxf, 0, "SECTION");
    push_group(&mut dxf, 2, "ENTITIES");
    for (index, primitive) in document.primitives.iter().enumerate() {
        write_entity(&mut dxf, primitive, FIRST_HANDLE + index as u32, &options.layer);
    }
    push_group(&mut dxf, 0, "ENDSEC");
    push_group(&mut dxf, 0, "EOF");

    dxf
}

fn write_entity(dxf: &mut String, primitive: &Primitive, handle: u32, layer: &str) {
    push_group(dxf, 0, primitive.entity_name());
    push_group(dxf, 5, &format!("{:X}", handle));
    push_group(dxf, 100, "AcDbEntity");
    push_group(dxf, 8, layer);

    match primitive {
        Primitive::Line { start, end } => {
            push_group(dxf, 100, "AcDbLine");
            push_point(dxf, 10, *start);
            push_point(dxf, 11, *end);
        }
        Primitive::Circle { center, radius } => {
            push_group(dxf, 100, "AcDbCircle");
            push_point(dxf, 10, *center);
            push_group(dxf, 40, &format_number(*radius));
        }
        Primitive::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            push_group(dxf, 100, "AcDbCircle");
            push_point(dxf, 10, *center);
            push_group(dxf, 40, &format_number(*radius));
            push_group(dxf, 100, "AcDbArc");
            push_group(dxf, 50, &format_number(*start_angle));
            push_group(dxf, 51, &format_number(*end_angle));
        }
        Primitive::Polyline { vertices, closed } => {
            push_group(dxf, 100, "AcDbPolyline");
            push_group(dxf, 90, &vertices.len().to_string());
            push_group(dxf, 70, if *closed { "1" } else { "0" });
            for vertex in vertices {
                push_group(dxf, 10, &format_number(vertex.x));
                push_group(dxf, 20, &format_number(vertex.y));
            }
        }
        Primitive::Spline {
            control_points,
            fit_points,
            degree,
            closed,
        } => {
            // A reader rejects a degree the control points cannot support
            let degree = (*degree as usize).min(control_points.len().saturating_sub(1)).max(1);
            let knots = clamped_knots(control_points.len(), degree);
            // Planar flag plus closed flag
            let flags = if *closed { 8 | 1 } else { 8 };

            push_group(dxf, 100, "AcDbSpline");
            push_group(dxf, 70, &flags.to_string());
            push_group(dxf, 71, &degree.to_string());
            push_group(dxf, 72, &knots.len().to_string());
            push_group(dxf, 73, &control_points.len().to_string());
            push_group(dxf, 74, &fit_points.len().to_string());
            for knot in &knots {
                push_group(dxf, 40, &format_number(*knot));
            }
            for point in control_points {
                push_point(dxf, 10, *point);
            }
            for point in fit_points {
                push_point(dxf, 11, *point);
            }
        }
    }
}

/// Clamped uniform knot vector for `count` control points
fn clamped_knots(count: usize, degree: usize) -> Vec<f64> {
    let spans = count.saturating_sub(degree);
    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    knots.extend((1..spans).map(|i| i as f64));
    knots.extend(std::iter::repeat_n(spans as f64, degree + 1));
    knots
}

fn push_group(dxf: &mut String, code: u16, value: &str) {
    dxf.push_str(&format!("{:>3}\n{}\n", code, value));
}

/// Write a 2D point with zero elevation; `code` is the X group code
fn push_point(dxf: &mut String, code: u16, point: DVec2) {
    push_group(dxf, code, &format_number(point.x));
    push_group(dxf, code + 10, &format_number(point.y));
    push_group(dxf, code + 20, "0.0");
}

/// Fixed-point formatting without trailing zeros
pub fn format_number(value: f64) -> String {
    let text = format!("{:.6}", value);
    let trimmed = text.trim_end_matches('0');
    let trimmed = trimmed
        .strip_suffix('.')
        .map_or_else(|| trimmed.to_string(), |s| format!("{}.0", s));
    if trimmed == "-0.0" {
        "0.0".to_string()
    } else {
        trimmed
    }
}
