use clap::Parser;

use experimentgl::app::App;
use experimentgl::args::Args;
use experimentgl::logging::init_logging;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    init_logging(args.logging_config());

    let app = match App::new(&args.window_config()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not open window: {e}");
            std::process::exit(1);
        }
    };

    let demo = match args.demo.build(&args.demo_options()) {
        Ok(demo) => demo,
        Err(e) => {
            log::error!("Could not set up {}: {e}", args.demo.title());
            std::process::exit(1);
        }
    };

    log::info!("Running {}", args.demo.title());

    app.run(demo);
}
