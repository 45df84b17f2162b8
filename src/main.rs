use knot_spline::cgmath::Point2;
use knot_spline::{Contour, Curve, LocateOptions, SvgArcsSink, Vertex};

fn main() -> knot_spline::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut curve = Curve::new();
    let square = curve.add_contour(Contour::from_vertices(vec![
        Vertex::at(100.0, 100.0),
        Vertex::at(500.0, 100.0),
        Vertex::at(500.0, 500.0),
        Vertex::at(100.0, 500.0),
    ])?);

    let contour = curve.contour(square)?;
    for j in 0..contour.len() {
        println!("vertex {}: {:?}", j, contour.classify(j, 0)?);
    }
    println!("{}", curve.svg_paths()?.join("\n"));

    // Double click halfway along the top edge.
    let target = curve.contour(square)?.position(0, 0.5)?;
    let click = Point2::new(target.x + 1.0, target.y - 1.0);
    match curve.insert_knot_near(click, &LocateOptions::default())? {
        Some((i, j)) => log::info!("inserted vertex {} into contour {}", j, i),
        None => log::info!("nothing near {:?}", click),
    }

    let mut arcs = SvgArcsSink::new();
    curve.evaluate(square, &mut arcs)?;
    for arc in arcs.arcs() {
        println!("{}", arc);
    }
    Ok(())
}
