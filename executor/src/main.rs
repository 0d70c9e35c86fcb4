mod config;
mod host;

use crate::{
    config::Cli,
    host::{GraphState, Host},
};
use clap::Parser;
use event_graph::{register_builtin_modules, CellStore, GraphDef, ModuleRegistry, StateMachine};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let def = GraphDef::load(&cli.graph)?;
    log::info!(
        "loaded graph {:?} ({} nodes) from {}",
        def.id,
        def.nodes.len(),
        cli.graph.display()
    );

    let mut registry = ModuleRegistry::new();
    register_builtin_modules(&mut registry)?;

    let mut cells = CellStore::new();
    for (name, value) in cli.cells.iter() {
        cells.insert(name.as_str(), *value);
    }

    let mut host = Host::new(&def, &registry, cells, cli.initial_state)?;

    let mut machine = StateMachine::new(cli.states);
    for id in 0..cli.states {
        let id = i32::try_from(id)?;
        machine.assign_state(id, Box::new(GraphState::new(id)))?;
    }
    machine.set_current_state_id(cli.initial_state, &mut host);

    let mut frame = 0;
    while frame < cli.frames && !machine.is_done() {
        machine.advance_frame(cli.delta_ms, &mut host);
        frame += 1;
    }

    if machine.is_done() {
        log::info!(
            "state machine finished after {frame} frames (state {})",
            machine.current_state_id()
        );
    } else {
        log::info!(
            "stopped after {frame} frames in state {}",
            machine.current_state_id()
        );
    }

    for (name, value) in host.cells.iter() {
        println!("{name} = {value}");
    }

    Ok(())
}
