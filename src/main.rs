//====================================================================

mod engine;
mod game;

//====================================================================

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    log::info!("Starting grid panel scene");

    game::run();
}

//====================================================================
