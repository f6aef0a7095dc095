use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use menutree::{MenuConfig, ScriptedSink, StatefulMenu, handler};
use simplelog::{Config, LevelFilter, SimpleLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let menu = Arc::new(StatefulMenu::new(MenuConfig::default()));
    let saves = Arc::new(AtomicUsize::new(0));

    // Plugins register their commands from their own threads
    let plugins: Vec<_> = ["File", "Edit", "View"]
        .into_iter()
        .map(|group| {
            let menu = Arc::clone(&menu);
            let saves = Arc::clone(&saves);
            thread::spawn(move || {
                menu.add(
                    format!("{group}/Save"),
                    handler(move || {
                        saves.fetch_add(1, Ordering::SeqCst);
                        println!("saved from {group}");
                    }),
                );
                menu.add(format!("{group}/Close"), handler(|| println!("closed")));
            })
        })
        .collect();
    for plugin in plugins {
        plugin.join().map_err(|_| "plugin thread panicked")?;
    }

    let mut sink = ScriptedSink::new();

    // Frame 1: popup is closed, requests are applied but nothing is drawn
    let stats = menu.render(&mut sink)?;
    println!("frame 1: {stats:?}");

    // Frame 2: the user opens the context menu and clicks File/Save
    menu.show(&mut sink);
    sink.activate("File/Save");
    let stats = menu.render(&mut sink)?;
    println!("frame 2: {stats:?}");
    for item in sink.presented_items() {
        println!("  {item}");
    }

    // Frame 3: View is unloaded while the menu is open
    sink.clear();
    menu.remove("View/Save");
    menu.remove("View/Close");
    let stats = menu.render(&mut sink)?;
    println!("frame 3: {stats:?}");
    for item in sink.presented_items() {
        println!("  {item}");
    }

    println!("saves: {}", saves.load(Ordering::SeqCst));
    Ok(())
}
