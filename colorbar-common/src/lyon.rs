use lyon_path::{Path, PathEvent};
use std::fmt::Write;

/// Number formatted for SVG output, rounded to three decimals
pub fn fmt_num(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Serialize a lyon path to the `d` attribute of an SVG `<path>` element
pub fn path_to_svg_d(path: &Path) -> Result<String, std::fmt::Error> {
    let mut d = String::new();
    for evt in path.iter() {
        match evt {
            PathEvent::Begin { at } => write!(d, "M{},{}", fmt_num(at.x), fmt_num(at.y))?,
            PathEvent::Line { to, .. } => write!(d, "L{},{}", fmt_num(to.x), fmt_num(to.y))?,
            PathEvent::Quadratic { ctrl, to, .. } => write!(
                d,
                "Q{},{},{},{}",
                fmt_num(ctrl.x),
                fmt_num(ctrl.y),
                fmt_num(to.x),
                fmt_num(to.y)
            )?,
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(
                d,
                "C{},{},{},{},{},{}",
                fmt_num(ctrl1.x),
                fmt_num(ctrl1.y),
                fmt_num(ctrl2.x),
                fmt_num(ctrl2.y),
                fmt_num(to.x),
                fmt_num(to.y)
            )?,
            PathEvent::End { close: true, .. } => d.push('Z'),
            PathEvent::End { close: false, .. } => {}
        }
    }
    Ok(d)
}
