use escape_maze::{core::file_io::load_params, MandelbrotParams};

/// Render the default Mandelbrot parameters and print the histogram
/// diagnostics to stdout.
/// ```sh
/// cargo run --example render-mandelbrot
/// ```
pub fn main() {
    env_logger::init();
    let params: MandelbrotParams =
        load_params("params/mandelbrot/default.json").expect("Unable to load parameters");
    let render = params.render().expect("Unable to render the Mandelbrot set");
    render
        .display_diagnostics(&mut std::io::stdout())
        .expect("Unable to write diagnostics");
}
