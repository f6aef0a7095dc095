use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use menutree::{MenuConfig, ScriptedSink, StatefulMenu, handler};

const PRODUCERS: usize = 4;
const PER_PRODUCER: usize = 1000;

/// Render in a loop on its own thread until `done` is set, checking every pass
/// with `check`. Returns the number of passes.
fn spawn_renderer<F>(
    menu: Arc<StatefulMenu>,
    done: Arc<AtomicBool>,
    check: F,
) -> thread::JoinHandle<usize>
where
    F: Fn(&StatefulMenu) + Send + 'static,
{
    thread::spawn(move || {
        let mut sink = ScriptedSink::new();
        let mut passes = 0;
        while !done.load(Ordering::SeqCst) {
            menu.render(&mut sink).expect("render pass failed");
            check(&menu);
            sink.clear();
            passes += 1;
        }
        passes
    })
}

#[test]
fn test_concurrent_producers_converge() {
    let menu = Arc::new(StatefulMenu::new(MenuConfig::inline()));
    let removed_hits = Arc::new(AtomicUsize::new(0));

    // Seed the leaves the producers will remove, so no removal can race its
    // own addition.
    for t in 0..PRODUCERS {
        for i in 0..PER_PRODUCER {
            let hits = Arc::clone(&removed_hits);
            let odd = i % 2 == 1;
            menu.add(
                format!("seed/{t}/{i}"),
                handler(move || {
                    if odd {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }
                }),
            );
        }
    }
    menu.render(&mut ScriptedSink::new()).unwrap();
    assert_eq!(menu.leaf_paths().len(), PRODUCERS * PER_PRODUCER);

    let done = Arc::new(AtomicBool::new(false));
    let renderer = spawn_renderer(Arc::clone(&menu), Arc::clone(&done), |_| {});

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|t| {
            let menu = Arc::clone(&menu);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    menu.add(format!("live/{t}/{i}"), handler(|| {}));
                    if i % 2 == 1 {
                        menu.remove(format!("seed/{t}/{i}"));
                    }
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    renderer.join().unwrap();

    let mut sink = ScriptedSink::new();
    for t in 0..PRODUCERS {
        for i in (1..PER_PRODUCER).step_by(2) {
            sink.activate(format!("seed/{t}/{i}"));
        }
    }
    menu.render(&mut sink).unwrap();
    assert_eq!(menu.pending_additions(), 0);
    assert_eq!(menu.pending_removals(), 0);

    let mut expected = BTreeSet::new();
    for t in 0..PRODUCERS {
        for i in 0..PER_PRODUCER {
            expected.insert(format!("live/{t}/{i}"));
            if i % 2 == 0 {
                expected.insert(format!("seed/{t}/{i}"));
            }
        }
    }

    let paths = menu.leaf_paths();
    let unique: BTreeSet<String> = paths.iter().cloned().collect();
    assert_eq!(unique.len(), paths.len(), "duplicate leaves");
    assert_eq!(unique, expected);
    assert_eq!(sink.presented_items().len(), expected.len());
    assert_eq!(removed_hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_concurrent_modify_never_drops_leaf() {
    let menu = Arc::new(StatefulMenu::new(MenuConfig::inline()));
    menu.add("shared", handler(|| {}));
    menu.render(&mut ScriptedSink::new()).unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let renderer = spawn_renderer(Arc::clone(&menu), Arc::clone(&done), |menu| {
        assert_eq!(menu.leaf_paths(), ["shared"]);
    });

    let writers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let menu = Arc::clone(&menu);
            thread::spawn(move || {
                for _ in 0..PER_PRODUCER {
                    menu.modify("shared", handler(|| {}));
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::SeqCst);
    renderer.join().unwrap();

    menu.render(&mut ScriptedSink::new()).unwrap();
    assert_eq!(menu.leaf_paths(), ["shared"]);
}

#[test]
fn test_last_handler_wins_after_racing_modifies() {
    let menu = Arc::new(StatefulMenu::new(MenuConfig::inline()));
    let hits = Arc::new(AtomicUsize::new(0));
    menu.add("cmd", handler(|| {}));
    menu.render(&mut ScriptedSink::new()).unwrap();

    let writers: Vec<_> = (0..PRODUCERS)
        .map(|_| {
            let menu = Arc::clone(&menu);
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                menu.modify(
                    "cmd",
                    handler(move || {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let mut sink = ScriptedSink::new();
    sink.activate("cmd");
    let stats = menu.render(&mut sink).unwrap();
    // Exactly one of the racing handlers is attached
    assert_eq!(stats.activated, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
