use crate::output::Output;
use comfy_table::Table;
use marquee_models::GENRES;
use serde_json::json;

pub fn run_genres(output: &Output) {
    if output.format().is_json() {
        let genres: Vec<_> = GENRES.iter().map(|(id, name)| json!({ "id": id, "name": name })).collect();
        output.json(&json!(genres));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Genre"]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    for (id, name) in GENRES {
        table.add_row(vec![id.to_string(), name.to_string()]);
    }
    output.table(&table);
    output.println("Pass a name or id to 'marquee browse --genre'.");
}
