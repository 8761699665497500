//! A single bar redrawn in place from 0 to 100.

use std::time::Duration;

use tally_bars::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut term = AnsiTerminal::stdout();
    let style = BarStyle::new()
        .max_value(100)
        .decorations("[", "]")
        .number_representation(NumberRepresentation::Percentage);
    let bar = Bar::new(&style, &term)?;

    let mut cursor = Cursor::new();
    cursor.clear_lines(&mut term, bar.lines_required())?;
    cursor.save(&mut term)?;
    for i in 0..=100 {
        cursor.restore(&mut term)?;
        bar.draw(&mut term, i, true)?;
        std::thread::sleep(Duration::from_millis(30));
    }
    term.write("\n")?;
    Ok(())
}
