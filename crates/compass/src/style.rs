//! Style overrides and the argument pre-pass that separates them.
//!
//! Style arguments (`c`, `f`, `s`, `fc`, `so`, `fo`) may appear anywhere in a
//! call's argument list. [`partition`] removes them before any positional
//! logic runs, so arity checks only ever see geometric arguments.

use serde::Serialize;

use compass_core::color::Color;

use crate::{
    ast::{Expr, ExprKind, StyleKey},
    value::Value,
};

/// Optional rendering overrides attached to a resolved value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_opacity: Option<f64>,
}

impl StyleOptions {
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn stroke_width(&self) -> Option<f64> {
        self.stroke_width
    }

    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    pub fn stroke_opacity(&self) -> Option<f64> {
        self.stroke_opacity
    }

    pub fn fill_opacity(&self) -> Option<f64> {
        self.fill_opacity
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies one resolved style argument; a later value for the same key
    /// replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns a message when the value has the wrong shape for the key:
    /// colors need a CSS color string, every other key a single number.
    /// Opacities must lie in `[0, 1]`.
    pub fn apply(&mut self, key: StyleKey, value: &Value) -> Result<(), String> {
        match key {
            StyleKey::Color | StyleKey::FillColor => {
                let Value::Text(text) = value else {
                    return Err(format!("style `{key}` expects a color name"));
                };
                let color = Color::new(text)?;
                if key == StyleKey::Color {
                    self.color = Some(color);
                } else {
                    self.fill_color = Some(color);
                }
            }
            StyleKey::FontSize | StyleKey::StrokeWidth => {
                let number = number_of(key, value)?;
                if key == StyleKey::FontSize {
                    self.font_size = Some(number);
                } else {
                    self.stroke_width = Some(number);
                }
            }
            StyleKey::StrokeOpacity | StyleKey::FillOpacity => {
                let number = number_of(key, value)?;
                if !(0.0..=1.0).contains(&number) {
                    return Err(format!("style `{key}` must be between 0 and 1, got {number}"));
                }
                if key == StyleKey::StrokeOpacity {
                    self.stroke_opacity = Some(number);
                } else {
                    self.fill_opacity = Some(number);
                }
            }
        }
        Ok(())
    }
}

fn number_of(key: StyleKey, value: &Value) -> Result<f64, String> {
    match value {
        Value::Scalar(v) => Ok(*v),
        _ => Err(format!("style `{key}` expects a number")),
    }
}

/// A style argument pulled out of a call, with its still-unresolved value.
#[derive(Debug, Clone)]
pub struct StyleArg {
    pub key: StyleKey,
    pub value: Expr,
}

/// Splits a call's arguments into style overrides and geometric arguments,
/// preserving the relative order of each group.
pub fn partition(args: Vec<Expr>) -> (Vec<StyleArg>, Vec<Expr>) {
    let mut styles = Vec::new();
    let mut geometric = Vec::with_capacity(args.len());
    for arg in args {
        if arg.style_key().is_some() {
            if let ExprKind::Style { key, value } = arg.into_kind() {
                styles.push(StyleArg { key, value: *value });
            }
        } else {
            geometric.push(arg);
        }
    }
    (styles, geometric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstBuilder, Op};

    #[test]
    fn test_partition_keeps_order() {
        let mut ast = AstBuilder::new();
        let red = ast.text("red");
        let color = ast.style(StyleKey::Color, red);
        let one = ast.number(1.0);
        let width = ast.number(3.0);
        let stroke = ast.style(StyleKey::StrokeWidth, width);
        let two = ast.number(2.0);

        let (styles, geometric) = partition(vec![color, one, stroke, two]);
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].key, StyleKey::Color);
        assert_eq!(styles[1].key, StyleKey::StrokeWidth);
        assert_eq!(geometric.len(), 2);
        assert!(matches!(geometric[0].kind(), ExprKind::Number(v) if *v == 1.0));
        assert!(matches!(geometric[1].kind(), ExprKind::Number(v) if *v == 2.0));
    }

    #[test]
    fn test_partition_leaves_nested_calls_alone() {
        let mut ast = AstBuilder::new();
        let point = ast.call_numbers(Op::Point, &[1.0, 2.0]);
        let (styles, geometric) = partition(vec![point]);
        assert!(styles.is_empty());
        assert_eq!(geometric.len(), 1);
    }

    #[test]
    fn test_apply() {
        let mut style = StyleOptions::default();
        assert!(style.is_empty());

        style.apply(StyleKey::Color, &Value::Text("blue".into())).unwrap();
        style.apply(StyleKey::FillOpacity, &Value::Scalar(0.4)).unwrap();
        style.apply(StyleKey::StrokeWidth, &Value::Scalar(2.0)).unwrap();
        style.apply(StyleKey::StrokeWidth, &Value::Scalar(5.0)).unwrap();

        assert_eq!(style.color(), Some(Color::new("blue").unwrap()));
        assert_eq!(style.fill_opacity(), Some(0.4));
        assert_eq!(style.stroke_width(), Some(5.0));
        assert!(!style.is_empty());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut style = StyleOptions::default();
        assert!(style.apply(StyleKey::Color, &Value::Scalar(1.0)).is_err());
        assert!(style.apply(StyleKey::FillColor, &Value::Text("nope".into())).is_err());
        assert!(style.apply(StyleKey::FontSize, &Value::Text("12".into())).is_err());
        assert!(style.apply(StyleKey::StrokeOpacity, &Value::Scalar(1.5)).is_err());
    }
}
