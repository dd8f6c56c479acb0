//! Plain-text scene format: one shape per line, whitespace-delimited.
//!
//! ```text
//! SQUARE x y size COLOR selected
//! CIRCLE x y diameter COLOR selected
//! RECTANGLE x y width height COLOR selected
//! ```
//!
//! `x y` is always the top-left corner of the shape's bounding box. Rotation
//! is not persisted. The selected flag is parsed for compatibility but a
//! loaded scene always starts deselected.

use crate::scene::Scene;
use crate::shapes::{Circle, Color, Rectangle, Shape, Square};
use kurbo::Point;
use std::fmt::Write as _;
use thiserror::Error;

/// Errors produced while parsing the text format.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl FormatError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Render a scene to the text format, one shape per line in z-order.
pub fn write_scene(scene: &Scene) -> String {
    let mut out = String::new();
    for shape in scene.iter() {
        let bounds = shape.bounds();
        let color = shape.color().token();
        let selected = shape.selected();
        // Infallible: writing to a String cannot fail.
        let _ = match shape {
            Shape::Square(s) => writeln!(
                out,
                "SQUARE {} {} {} {color} {selected}",
                num(bounds.x0),
                num(bounds.y0),
                num(s.size),
            ),
            Shape::Circle(c) => writeln!(
                out,
                "CIRCLE {} {} {} {color} {selected}",
                num(bounds.x0),
                num(bounds.y0),
                num(c.diameter),
            ),
            Shape::Rectangle(r) => writeln!(
                out,
                "RECTANGLE {} {} {} {} {color} {selected}",
                num(bounds.x0),
                num(bounds.y0),
                num(r.width),
                num(r.height),
            ),
        };
    }
    out
}

/// Parse a scene from the text format. Blank lines are skipped; any
/// malformed line aborts the whole parse with a 1-based line number.
pub fn parse_scene(input: &str) -> Result<Scene, FormatError> {
    let mut scene = Scene::new();
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let shape = match tokens[0] {
            "SQUARE" => {
                expect_fields(line_no, &tokens, 6)?;
                let x = number(line_no, tokens[1], "x")?;
                let y = number(line_no, tokens[2], "y")?;
                let size = number(line_no, tokens[3], "size")?;
                let color = Color::from_token(tokens[4]);
                boolean(line_no, tokens[5])?;
                Shape::Square(Square::new(Point::new(x, y), size, color))
            }
            "CIRCLE" => {
                expect_fields(line_no, &tokens, 6)?;
                let x = number(line_no, tokens[1], "x")?;
                let y = number(line_no, tokens[2], "y")?;
                let diameter = number(line_no, tokens[3], "diameter")?;
                let color = Color::from_token(tokens[4]);
                boolean(line_no, tokens[5])?;
                let center = Point::new(x + diameter / 2.0, y + diameter / 2.0);
                Shape::Circle(Circle::new(center, diameter, color))
            }
            "RECTANGLE" => {
                expect_fields(line_no, &tokens, 7)?;
                let x = number(line_no, tokens[1], "x")?;
                let y = number(line_no, tokens[2], "y")?;
                let width = number(line_no, tokens[3], "width")?;
                let height = number(line_no, tokens[4], "height")?;
                let color = Color::from_token(tokens[5]);
                boolean(line_no, tokens[6])?;
                Shape::Rectangle(Rectangle::new(Point::new(x, y), width, height, color))
            }
            other => {
                return Err(FormatError::parse(
                    line_no,
                    format!("unknown shape keyword `{other}`"),
                ));
            }
        };
        scene.add_shape(shape);
    }
    scene.deselect_all();
    Ok(scene)
}

/// Format a coordinate, dropping the fraction when it is a whole number.
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn expect_fields(line: usize, tokens: &[&str], want: usize) -> Result<(), FormatError> {
    if tokens.len() != want {
        return Err(FormatError::parse(
            line,
            format!("expected {want} fields, found {}", tokens.len()),
        ));
    }
    Ok(())
}

fn number(line: usize, token: &str, field: &str) -> Result<f64, FormatError> {
    token
        .parse::<f64>()
        .map_err(|_| FormatError::parse(line, format!("invalid number for {field}: `{token}`")))
}

fn boolean(line: usize, token: &str) -> Result<bool, FormatError> {
    match token.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FormatError::parse(
            line,
            format!("invalid selected flag: `{token}`"),
        )),
    }
}
