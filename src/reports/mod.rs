use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pianokeys::geometry::Layout;
use pianokeys::keys;
use pianokeys::listener::KeyEvent;
use pianokeys::press::PressedKeys;

pub struct ReplayStep {
    pub step: usize,
    pub input: String,
    pub emitted: Vec<KeyEvent>,
}

pub fn print_dimensions(layout: &Layout) {
    let dims = layout.dimensions();
    let counts = layout.counts();

    println!("\nLayout: {} x {} px", layout.width(), layout.height());
    println!(
        "Keys: {} ({} white, {} black), stroke {} px",
        layout.number_of_keys(),
        counts.white,
        counts.black,
        layout.stroke_width()
    );
    println!(
        "White key: {} x {} px, black key: {} x {} px, remainder: {} px",
        dims.white_key_width,
        dims.white_key_height,
        dims.black_key_width,
        dims.black_key_height,
        dims.width_remainder
    );
}

pub fn print_key_table(layout: &Layout, pressed: &PressedKeys) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Class"),
        Cell::new("Octave"),
        Cell::new("Left"),
        Cell::new("Top"),
        Cell::new("Right"),
        Cell::new("Bottom"),
        Cell::new("Width").fg(Color::Cyan),
    ]);

    for i in 2..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (ix, rect) in layout.keys().iter().enumerate() {
        let class = if keys::is_white(ix) { "white" } else { "black" };
        let key_cell = if pressed.is_pressed(ix) {
            Cell::new(format!("{}*", ix)).fg(Color::Yellow)
        } else {
            Cell::new(ix)
        };
        table.add_row(vec![
            key_cell.add_attribute(Attribute::Bold),
            Cell::new(class),
            Cell::new(keys::octave_of(ix)),
            Cell::new(rect.left),
            Cell::new(rect.top),
            Cell::new(rect.right),
            Cell::new(rect.bottom),
            Cell::new(rect.width()).fg(Color::Cyan),
        ]);
    }
    println!("{}", table);
}

pub fn print_replay(steps: &[ReplayStep], pressed: &PressedKeys) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Pointer"),
        Cell::new("Key Events").fg(Color::Green),
    ]);

    for step in steps {
        let events = step
            .emitted
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            Cell::new(step.step),
            Cell::new(&step.input),
            Cell::new(if events.is_empty() { "-".to_string() } else { events }).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
    println!("Pressed keys: {:?}", pressed.to_vec());
}
