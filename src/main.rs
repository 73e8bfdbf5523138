use countdown::{
    default_source, run,
    scenario::{progress_hook, EvolutionHooks},
    Config, CountdownError,
};
use log::info;
use std::{env, time::Instant};

fn main() -> Result<(), CountdownError> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut rng = default_source()?;
    let mut hooks = EvolutionHooks::default();
    hooks.push(progress_hook(config.report_interval));

    let start = Instant::now();
    let solution = run(&config, &mut rng, hooks)?;
    info!("finished in {:?} ({:?})", start.elapsed(), solution.outcome);

    println!("{solution}");
    Ok(())
}
