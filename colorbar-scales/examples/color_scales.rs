use colorbar_common::color::color_to_css;
use colorbar_common::domain::DomainValue;
use colorbar_scales::axis_scale::AxisScale;
use colorbar_scales::color::linear::LinearColorScale;
use colorbar_scales::color::schemes::Scheme;
use colorbar_scales::color::{ColorScale, ColorSpace};
use colorbar_scales::formatter::TickFormat;
use colorbar_scales::kind::ScaleKind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scale = LinearColorScale::try_new_uniform((-10.0, 35.0), Scheme::RdYlBu.colors()?)?
        .with_color_space(ColorSpace::Lab);
    let kind = ScaleKind::infer(&scale)?;
    let axis = AxisScale::from_color_scale(&scale, kind, (240.0, 0.0))?;

    println!("{kind} scale over a 240px bar");
    let ticks = axis.ticks(Some(5.0));
    let labels = axis.format(&ticks, Some(5.0), &TickFormat::Auto);
    for (tick, label) in ticks.iter().zip(labels) {
        let px = axis.scale(tick).unwrap_or(f32::NAN);
        let color = scale.color(tick).map(|c| color_to_css(&c)).unwrap_or_default();
        println!("{label:>4}  y={px:>6.1}  {color}");
    }

    if let Some(DomainValue::Number(v)) = axis.invert(60.0) {
        println!("y=60 is {v:.2}");
    }
    Ok(())
}
