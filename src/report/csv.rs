use super::table::Table;

pub fn to_csv(table: &Table) -> String {
    let mut output = String::new();
    write_record(&mut output, &table.header);
    for row in &table.rows {
        write_record(&mut output, row);
    }
    output
}

fn write_record(output: &mut String, fields: &[String]) {
    let line = fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",");
    output.push_str(&line);
    output.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
