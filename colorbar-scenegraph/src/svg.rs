//! Standalone SVG documents from a scene graph

use std::collections::HashSet;
use std::fmt::Write;

use colorbar_common::color::color_to_css;
use colorbar_common::lyon::{fmt_num, path_to_svg_d};
use colorbar_common::types::{Color, Paint};
use itertools::izip;
use log::debug;

use crate::defs::{Def, LinearGradientDef, PatternDef};
use crate::error::ColorbarSceneGraphError;
use crate::ids::unique_id;
use crate::marks::group::{Clip, SceneGroup};
use crate::marks::mark::SceneMark;
use crate::marks::path::{PathTransform, ScenePathMark};
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::text::SceneTextMark;
use crate::scene_graph::SceneGraph;

/// Escapes text content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn opaque_css(color: &Color) -> String {
    color_to_css(&[color[0], color[1], color[2], 1.0])
}

/// ` fill="..."` style attributes for a paint, with a separate opacity when translucent
fn paint_attrs(name: &str, paint: &Paint) -> String {
    match paint {
        Paint::None => format!(" {name}=\"none\""),
        Paint::Color(color) if color[3] >= 1.0 => {
            format!(" {name}=\"{}\"", opaque_css(color))
        }
        Paint::Color(color) => format!(
            " {name}=\"{}\" {name}-opacity=\"{}\"",
            opaque_css(color),
            fmt_num(color[3].max(0.0))
        ),
        Paint::Url(id) => format!(" {name}=\"url(#{})\"", escape_xml(id)),
    }
}

fn sorted_marks(marks: &[SceneMark]) -> Vec<&SceneMark> {
    let mut sorted: Vec<&SceneMark> = marks.iter().collect();
    // stable, so marks without a zindex keep document order
    sorted.sort_by_key(|m| m.zindex().unwrap_or(0));
    sorted
}

struct SvgWriter {
    out: String,
    defined: HashSet<String>,
}

impl SvgWriter {
    fn check_paint(&self, paint: &Paint) -> Result<(), ColorbarSceneGraphError> {
        match paint {
            Paint::Url(id) if !self.defined.contains(id) => {
                Err(ColorbarSceneGraphError::UndefinedDef(id.clone()))
            }
            _ => Ok(()),
        }
    }

    fn write_defs(&mut self, defs: &[&Def]) -> Result<(), ColorbarSceneGraphError> {
        if defs.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "<defs>")?;
        for def in defs {
            match def {
                Def::LinearGradient(gradient) => self.write_gradient(gradient)?,
                Def::Pattern(pattern) => self.write_pattern(pattern)?,
            }
        }
        writeln!(self.out, "</defs>")?;
        Ok(())
    }

    fn write_gradient(&mut self, gradient: &LinearGradientDef) -> Result<(), ColorbarSceneGraphError> {
        writeln!(
            self.out,
            r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            escape_xml(&gradient.id),
            fmt_num(gradient.x1),
            fmt_num(gradient.y1),
            fmt_num(gradient.x2),
            fmt_num(gradient.y2)
        )?;
        for stop in &gradient.stops {
            writeln!(
                self.out,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                fmt_num(stop.offset.clamp(0.0, 1.0)),
                opaque_css(&stop.color),
                fmt_num(stop.color[3].clamp(0.0, 1.0))
            )?;
        }
        writeln!(self.out, "</linearGradient>")?;
        Ok(())
    }

    fn write_pattern(&mut self, pattern: &PatternDef) -> Result<(), ColorbarSceneGraphError> {
        writeln!(
            self.out,
            r#"<pattern id="{}" patternUnits="userSpaceOnUse" width="{}" height="{}">"#,
            escape_xml(&pattern.id),
            fmt_num(pattern.width),
            fmt_num(pattern.height)
        )?;
        for mark in sorted_marks(&pattern.marks) {
            self.write_mark(mark)?;
        }
        writeln!(self.out, "</pattern>")?;
        Ok(())
    }

    fn write_mark(&mut self, mark: &SceneMark) -> Result<(), ColorbarSceneGraphError> {
        match mark {
            SceneMark::Rect(mark) => self.write_rect(mark),
            SceneMark::Rule(mark) => self.write_rule(mark),
            SceneMark::Text(mark) => self.write_text(mark),
            SceneMark::Path(mark) => self.write_path(mark),
            SceneMark::Group(group) => self.write_group(group),
        }
    }

    fn write_group(&mut self, group: &SceneGroup) -> Result<(), ColorbarSceneGraphError> {
        let mut attrs = String::new();
        if !group.name.is_empty() {
            write!(attrs, r#" class="{}""#, escape_xml(&group.name))?;
        }
        if group.origin != [0.0, 0.0] {
            write!(
                attrs,
                r#" transform="translate({},{})""#,
                fmt_num(group.origin[0]),
                fmt_num(group.origin[1])
            )?;
        }
        writeln!(self.out, "<g{attrs}>")?;

        // clip coordinates are in the group's own space, so the clip is
        // applied on an inner group
        let clip_id = match &group.clip {
            Clip::None => None,
            Clip::Rect {
                x,
                y,
                width,
                height,
            } => {
                let id = unique_id("clip");
                writeln!(
                    self.out,
                    r#"<clipPath id="{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height)
                )?;
                writeln!(self.out, r#"<g clip-path="url(#{id})">"#)?;
                Some(id)
            }
        };

        for mark in sorted_marks(&group.marks) {
            self.write_mark(mark)?;
        }

        if clip_id.is_some() {
            writeln!(self.out, "</g>")?;
        }
        writeln!(self.out, "</g>")?;
        Ok(())
    }

    fn write_rect(&mut self, mark: &SceneRectMark) -> Result<(), ColorbarSceneGraphError> {
        for (x, y, width, height, fill, stroke, stroke_width, corner_radius) in izip!(
            mark.x_iter(),
            mark.y_iter(),
            mark.width_iter(),
            mark.height_iter(),
            mark.fill_iter(),
            mark.stroke_iter(),
            mark.stroke_width_iter(),
            mark.corner_radius_iter()
        ) {
            self.check_paint(fill)?;
            self.check_paint(stroke)?;

            // SVG rects need non-negative sizes
            let (x0, w) = if *width < 0.0 { (x + width, -width) } else { (*x, *width) };
            let (y0, h) = if *height < 0.0 { (y + height, -height) } else { (*y, *height) };

            write!(
                self.out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(x0),
                fmt_num(y0),
                fmt_num(w),
                fmt_num(h)
            )?;
            if *corner_radius > 0.0 {
                write!(self.out, r#" rx="{}""#, fmt_num(*corner_radius))?;
            }
            self.out.push_str(&paint_attrs("fill", fill));
            if !stroke.is_none() && *stroke_width > 0.0 {
                self.out.push_str(&paint_attrs("stroke", stroke));
                write!(self.out, r#" stroke-width="{}""#, fmt_num(*stroke_width))?;
            }
            writeln!(self.out, "/>")?;
        }
        Ok(())
    }

    fn write_rule(&mut self, mark: &SceneRuleMark) -> Result<(), ColorbarSceneGraphError> {
        for (x, y, x2, y2, stroke, stroke_width) in izip!(
            mark.x_iter(),
            mark.y_iter(),
            mark.x2_iter(),
            mark.y2_iter(),
            mark.stroke_iter(),
            mark.stroke_width_iter()
        ) {
            self.check_paint(stroke)?;
            writeln!(
                self.out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}" stroke-linecap="{}"/>"#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*x2),
                fmt_num(*y2),
                paint_attrs("stroke", stroke),
                fmt_num(*stroke_width),
                mark.stroke_cap.as_svg_str()
            )?;
        }
        Ok(())
    }

    fn write_text(&mut self, mark: &SceneTextMark) -> Result<(), ColorbarSceneGraphError> {
        for (text, x, y, align, baseline, angle, color, font, font_size, font_weight) in izip!(
            mark.text_iter(),
            mark.x_iter(),
            mark.y_iter(),
            mark.align_iter(),
            mark.baseline_iter(),
            mark.angle_iter(),
            mark.color_iter(),
            mark.font_iter(),
            mark.font_size_iter(),
            mark.font_weight_iter()
        ) {
            write!(
                self.out,
                r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="{}" font-family="{}" font-size="{}" font-weight="{}""#,
                fmt_num(*x),
                fmt_num(*y),
                align.as_svg_anchor(),
                baseline.as_svg_baseline(),
                escape_xml(font),
                fmt_num(*font_size),
                font_weight.as_svg_str()
            )?;
            self.out.push_str(&paint_attrs("fill", &Paint::Color(*color)));
            if *angle != 0.0 {
                write!(
                    self.out,
                    r#" transform="rotate({},{},{})""#,
                    fmt_num(*angle),
                    fmt_num(*x),
                    fmt_num(*y)
                )?;
            }
            writeln!(self.out, ">{}</text>", escape_xml(text))?;
        }
        Ok(())
    }

    fn write_path(&mut self, mark: &ScenePathMark) -> Result<(), ColorbarSceneGraphError> {
        for (path, fill, stroke, transform) in izip!(
            mark.path_iter(),
            mark.fill_iter(),
            mark.stroke_iter(),
            mark.transform_iter()
        ) {
            self.check_paint(fill)?;
            self.check_paint(stroke)?;
            write!(self.out, r#"<path d="{}""#, path_to_svg_d(path)?)?;
            if *transform != PathTransform::identity() {
                write!(
                    self.out,
                    r#" transform="matrix({},{},{},{},{},{})""#,
                    fmt_num(transform.m11),
                    fmt_num(transform.m12),
                    fmt_num(transform.m21),
                    fmt_num(transform.m22),
                    fmt_num(transform.m31),
                    fmt_num(transform.m32)
                )?;
            }
            self.out.push_str(&paint_attrs("fill", fill));
            let stroke_width = mark.stroke_width.unwrap_or(1.0);
            if !stroke.is_none() && stroke_width > 0.0 {
                self.out.push_str(&paint_attrs("stroke", stroke));
                write!(
                    self.out,
                    r#" stroke-width="{}" stroke-linejoin="{}""#,
                    fmt_num(stroke_width),
                    mark.stroke_join.as_svg_str()
                )?;
            }
            writeln!(self.out, "/>")?;
        }
        Ok(())
    }
}

fn collect_defs<'a>(marks: &'a [SceneMark], defs: &mut Vec<&'a Def>) {
    for mark in marks {
        if let SceneMark::Group(group) = mark {
            defs.extend(group.defs.iter());
            collect_defs(&group.marks, defs);
        }
    }
}

impl SceneGraph {
    /// Writes the scene as a standalone SVG document. Defs from every
    /// group are hoisted into a single `<defs>` element.
    pub fn to_svg(&self) -> Result<String, ColorbarSceneGraphError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ColorbarSceneGraphError::InvalidCanvasSize {
                width: self.width,
                height: self.height,
            });
        }

        let mut defs = Vec::new();
        collect_defs(&self.marks, &mut defs);

        let mut writer = SvgWriter {
            out: String::new(),
            defined: defs.iter().map(|d| d.id().to_string()).collect(),
        };

        writeln!(
            writer.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height)
        )?;
        writer.write_defs(&defs)?;
        writeln!(
            writer.out,
            r#"<g transform="translate({},{})">"#,
            fmt_num(self.origin[0]),
            fmt_num(self.origin[1])
        )?;
        for mark in sorted_marks(&self.marks) {
            writer.write_mark(mark)?;
        }
        writeln!(writer.out, "</g>")?;
        writeln!(writer.out, "</svg>")?;

        debug!(
            "Wrote {}x{} SVG with {} defs ({} bytes)",
            self.width,
            self.height,
            defs.len(),
            writer.out.len()
        );
        Ok(writer.out)
    }
}
