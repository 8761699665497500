//! A hierarchy of jobs redrawn in place while leaf values advance.
//!
//! Groups show the floored mean of their children. Run with
//! `RUST_LOG=tally_bars=debug` to see frame diagnostics on stderr.

use std::time::Duration;

use tally_bars::*;

// -- Data --------------------------------------------------------------------

fn warp_jump(values: &[Value]) -> ProgressTree {
    // Titles beside the bars keep the whole tree within 24 rows.
    let style = BarStyle::new()
        .max_value(10)
        .title_position(TitlePosition::Left);
    let leaf = |i: usize| BarLeaf::with_style(values[i].clone(), style.clone());

    ProgressTree::group([(
        "Warp Jump",
        ProgressTree::group([
            (
                "1) Prepare fuel",
                ProgressTree::group([
                    (
                        "Load Tanks",
                        ProgressTree::group([("Tank 1", leaf(0)), ("Tank 2", leaf(1))]),
                    ),
                    ("Refine tylium ore", ProgressTree::from(leaf(2))),
                ]),
            ),
            (
                "2) Calculate jump co-ordinates",
                ProgressTree::group([(
                    "Resolve common name to co-ordinates",
                    ProgressTree::group([("Querying resolution from baseship", leaf(3))]),
                )]),
            ),
            (
                "3) Perform jump",
                ProgressTree::group([
                    ("Check FTL drive readiness", leaf(4)),
                    ("Juuuuuump!", leaf(5)),
                ]),
            ),
        ]),
    )])
}

// -- Main --------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let values: Vec<Value> = (0..6).map(|_| Value::new(0)).collect();
    let tree = warp_jump(&values);

    // The groups' aggregate bars count to 10 as well.
    let progress = TreeProgress::new().with_group_style(BarStyle::new().max_value(10));
    let mut runner = RenderLoop::new(progress, AnsiTerminal::stdout())
        .interval(Duration::from_millis(120));

    runner.run_until(&tree, || {
        if let Some(v) = values.iter().find(|v| v.get() < 10) {
            v.add(1);
        }
        values.iter().all(|v| v.get() == 10)
    })
}
