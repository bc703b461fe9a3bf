//! Retained scene graph for one dial
//!
//! Every element is created once in [`Scene::build`] and addressed by field.

use facet_svg::facet_xml::{self, SerializeOptions};
use facet_svg::{Circle, Group, Path, SVG_NS, Style, Svg, SvgNode, Text};
use glam::dvec2;

use crate::config::DialConfig;
use crate::errors::RenderError;
use crate::geometry::{donut_path, fmt_num, points_to_path};

use super::stylesheet;
use super::ticks::TickShapes;

/// Space-separated class attribute with set semantics and stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new(classes: &str) -> Self {
        let mut list = Self::default();
        for class in classes.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.0.retain(|c| !c.starts_with(prefix));
    }

    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_attr(&self) -> String {
        self.0.join(" ")
    }
}

/// Leaf icon path on a 100x100 grid, scaled to the dial at build time.
enum LeafToken {
    Cmd(&'static str),
    Num(f64),
}

use LeafToken::{Cmd, Num};

#[rustfmt::skip]
const LEAF_PATH: &[LeafToken] = &[
    Cmd("M"), Num(3.0), Num(84.0),
    Cmd("c"), Num(24.0), Num(17.0), Num(51.0), Num(18.0), Num(73.0), Num(-6.0),
    Cmd("C"), Num(100.0), Num(52.0), Num(100.0), Num(22.0), Num(100.0), Num(4.0),
    Cmd("c"), Num(-13.0), Num(15.0), Num(-37.0), Num(9.0), Num(-70.0), Num(19.0),
    Cmd("C"), Num(4.0), Num(32.0), Num(0.0), Num(63.0), Num(0.0), Num(76.0),
    Cmd("c"), Num(6.0), Num(-7.0), Num(18.0), Num(-17.0), Num(33.0), Num(-23.0),
        Num(24.0), Num(-9.0), Num(34.0), Num(-9.0), Num(48.0), Num(-20.0),
        Num(-9.0), Num(10.0), Num(-20.0), Num(16.0), Num(-43.0), Num(24.0),
    Cmd("C"), Num(22.0), Num(63.0), Num(8.0), Num(78.0), Num(3.0), Num(84.0),
    Cmd("z"),
];

fn leaf_path(scale: f64) -> String {
    LEAF_PATH
        .iter()
        .map(|token| match token {
            Cmd(c) => (*c).to_string(),
            Num(n) => fmt_num(n * scale),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// All elements of a dial, in draw order.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: String,
    pub height: String,
    pub view_box: String,
    pub root_classes: ClassList,
    pub style: Option<Style>,
    pub shape: Circle,
    pub editable_indicator: Path,
    pub ticks_group_class: String,
    pub ticks: Vec<Path>,
    pub lbl_target: Text,
    pub lbl_name: Text,
    pub lbl_target_half: Text,
    pub lbl_target_half_classes: ClassList,
    pub lbl_ambient: Text,
    pub lbl_away: Text,
    pub ico_leaf: Path,
    pub(crate) tick_shapes: TickShapes,
}

impl Scene {
    /// Build the static scaffold. Tick count is fixed from here on.
    pub fn build(config: &DialConfig) -> Self {
        let d = config.diameter;
        let r = config.radius();
        let size_class = format!("dial__{}", config.size_preset);
        let label_class = |modifier: &str| format!("dial__lbl dial__lbl--{modifier} {size_class}");

        let tick_shapes = TickShapes::new(config);
        let idle_tick = points_to_path(&tick_shapes.normal);
        let ticks = (0..config.num_ticks)
            .map(|_| Path {
                d: Some(idle_tick.clone()),
                ..Default::default()
            })
            .collect();

        let leaf_scale = r / 5.0 / 100.0;
        let leaf_translate = dvec2(r - leaf_scale * 100.0 * 0.5, r * 1.5);

        Self {
            width: format!("{}px", fmt_num(d)),
            height: format!("{}px", fmt_num(d)),
            view_box: format!("0 0 {} {}", fmt_num(d), fmt_num(d)),
            root_classes: ClassList::new("dial"),
            style: config
                .embed_style
                .then(|| stylesheet::dial_stylesheet(config)),
            shape: Circle {
                cx: Some(r),
                cy: Some(r),
                r: Some(r),
                class: Some("dial__shape".to_string()),
                ..Default::default()
            },
            editable_indicator: Path {
                d: Some(donut_path(r, r, r - 4.0, r - 8.0)),
                class: Some("dial__editableIndicator".to_string()),
                ..Default::default()
            },
            ticks_group_class: "dial__ticks".to_string(),
            ticks,
            lbl_target: Text {
                x: Some(r),
                y: Some(r),
                class: Some(label_class("target")),
                ..Default::default()
            },
            lbl_name: Text {
                x: Some(r),
                y: Some(r * 1.4),
                class: Some(label_class("name")),
                ..Default::default()
            },
            lbl_target_half: Text {
                x: Some(r + r / 2.5),
                y: Some(r - r / 8.0),
                content: "5".to_string(),
                ..Default::default()
            },
            lbl_target_half_classes: ClassList::new(&label_class("target--half")),
            lbl_ambient: Text {
                class: Some(label_class("ambient")),
                ..Default::default()
            },
            lbl_away: Text {
                x: Some(r),
                y: Some(r),
                class: Some(label_class("away")),
                content: "AWAY".to_string(),
                ..Default::default()
            },
            ico_leaf: Path {
                d: Some(leaf_path(leaf_scale)),
                class: Some("dial__ico__leaf".to_string()),
                transform: Some(format!(
                    "translate({},{})",
                    fmt_num(leaf_translate.x),
                    fmt_num(leaf_translate.y)
                )),
                ..Default::default()
            },
            tick_shapes,
        }
    }

    /// Assemble the SVG document for the current scene state.
    pub fn to_svg(&self) -> Svg {
        let mut children = Vec::new();
        if let Some(style) = &self.style {
            children.push(SvgNode::Style(style.clone()));
        }
        children.push(SvgNode::Circle(self.shape.clone()));
        children.push(SvgNode::Path(self.editable_indicator.clone()));
        children.push(SvgNode::G(Group {
            class: Some(self.ticks_group_class.clone()),
            children: self.ticks.iter().cloned().map(SvgNode::Path).collect(),
            ..Default::default()
        }));
        children.push(SvgNode::Text(self.lbl_target.clone()));
        children.push(SvgNode::Text(self.lbl_name.clone()));
        children.push(SvgNode::Text(Text {
            class: Some(self.lbl_target_half_classes.to_attr()),
            ..self.lbl_target_half.clone()
        }));
        children.push(SvgNode::Text(self.lbl_ambient.clone()));
        children.push(SvgNode::Text(self.lbl_away.clone()));
        children.push(SvgNode::Path(self.ico_leaf.clone()));

        Svg {
            xmlns: Some(SVG_NS.to_string()),
            width: Some(self.width.clone()),
            height: Some(self.height.clone()),
            view_box: Some(self.view_box.clone()),
            class: Some(self.root_classes.to_attr()),
            children,
        }
    }

    /// Serialize the current scene state to an SVG string.
    ///
    /// Numeric attributes use the same formatting as path data.
    pub fn to_svg_string(&self) -> Result<String, RenderError> {
        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&self.to_svg(), &options).map_err(|e| {
            RenderError::Serialize {
                message: e.to_string(),
            }
        })
    }
}
