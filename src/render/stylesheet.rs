//! Embedded dial stylesheet
//!
//! Font sizes are tuned for the 400px dial and scaled with the diameter.

use facet_svg::Style;

use crate::config::DialConfig;
use crate::geometry::fmt_num;

const REFERENCE_DIAMETER: f64 = 400.0;

/// `(label modifier, font size at 400px, bold)`
const LABEL_FONTS: [(&str, f64, bool); 5] = [
    ("target", 120.0, true),
    ("target--half", 40.0, true),
    ("ambient", 22.0, true),
    ("name", 22.0, false),
    ("away", 72.0, true),
];

/// Build the `<style>` element for a dial.
pub fn dial_stylesheet(config: &DialConfig) -> Style {
    let theme = &config.theme;
    let scale = config.diameter / REFERENCE_DIAMETER;
    let size_class = format!("dial__{}", config.size_preset);

    let mut css = String::new();
    css.push_str(".dial { user-select: none; }\n");
    css.push_str(&format!(
        ".dial__shape {{ fill: {}; transition: fill 0.5s; }}\n",
        theme.off
    ));
    css.push_str(&format!(
        ".dial--state--heating .dial__shape {{ fill: {}; }}\n",
        theme.heating
    ));
    css.push_str(&format!(
        ".dial--state--cooling .dial__shape {{ fill: {}; }}\n",
        theme.cooling
    ));
    css.push_str(&format!(
        ".dial__editableIndicator {{ fill: {}; fill-rule: evenodd; opacity: 0; }}\n",
        theme.label
    ));
    css.push_str(&format!(".dial__ticks path {{ fill: {}; }}\n", theme.tick));
    css.push_str(&format!(
        ".dial__ticks path.active {{ fill: {}; }}\n",
        theme.tick_active
    ));
    css.push_str(&format!(
        ".dial__lbl {{ fill: {}; text-anchor: middle; font-family: Helvetica, Arial, sans-serif; }}\n",
        theme.label
    ));
    for (modifier, size, bold) in LABEL_FONTS {
        css.push_str(&format!(
            ".dial__lbl--{}.{} {{ font-size: {}px;{} }}\n",
            modifier,
            size_class,
            fmt_num(size * scale),
            if bold { " font-weight: bold;" } else { "" }
        ));
    }
    css.push_str(".dial__lbl--target { dominant-baseline: central; }\n");
    css.push_str(".dial__lbl--target--half { opacity: 0; transition: opacity 0.1s; }\n");
    css.push_str(".dial__lbl--target--half.shown { opacity: 1; }\n");
    css.push_str(".dial__lbl--away { dominant-baseline: central; opacity: 0; }\n");
    css.push_str(".dial.away .dial__lbl--away { opacity: 1; }\n");
    css.push_str(
        ".dial.away .dial__lbl--target, .dial.away .dial__lbl--target--half { opacity: 0; }\n",
    );
    css.push_str(&format!(
        ".dial__ico__leaf {{ fill: {}; opacity: 0; transition: opacity 0.5s; }}\n",
        theme.leaf
    ));
    css.push_str(".dial.has-leaf .dial__ico__leaf { opacity: 1; }\n");

    Style {
        type_: Some("text/css".to_string()),
        content: css,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DialOptions, SizePreset};
    use facet_svg::Color;

    #[test]
    fn fonts_scale_with_diameter() {
        let config =
            DialConfig::from_options(&DialOptions::new().size(SizePreset::Medium)).unwrap();
        let css = dial_stylesheet(&config).content;
        assert!(css.contains(".dial__lbl--target.dial__medium { font-size: 90px; font-weight: bold; }"));
        assert!(css.contains(".dial__lbl--name.dial__medium { font-size: 16.5px; }"));
    }

    #[test]
    fn theme_colors_are_used() {
        let mut options = DialOptions::new();
        options.theme.heating = Color::Rgb { r: 1, g: 2, b: 3 };
        let config = DialConfig::from_options(&options).unwrap();
        let style = dial_stylesheet(&config);
        assert_eq!(style.type_.as_deref(), Some("text/css"));
        assert!(style
            .content
            .contains(".dial--state--heating .dial__shape { fill: rgb(1,2,3); }"));
        assert!(style
            .content
            .contains(".dial__ticks path.active { fill: rgba(255,255,255,0.8); }"));
    }
}
