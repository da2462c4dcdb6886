use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Sections of a simulation result printed as their own tables.
const SUB_TABELAS: [(&str, &str); 2] = [
    ("comparativoRegimes", "Comparativo de regimes"),
    ("timeline", "Cronograma"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    let Value::Object(res_map) = result else {
        print_flat_object(envelope);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Campo", "Valor"]);
    for (key, val) in res_map {
        if SUB_TABELAS.iter().any(|(k, _)| k == key) {
            continue;
        }
        push_flattened(&mut builder, key, val);
    }
    println!("{}", Table::from(builder));

    for (key, titulo) in SUB_TABELAS {
        let linhas = match res_map.get(key) {
            Some(Value::Array(arr)) => Some(arr),
            Some(Value::Object(obj)) => match obj.get("entries") {
                Some(Value::Array(arr)) => Some(arr),
                _ => None,
            },
            _ => None,
        };
        if let Some(arr) = linhas {
            println!("\n{}:", titulo);
            print_array_table(arr);
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nAlertas:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMetodologia: {}", meth);
    }
    if let Some(Value::String(prompt)) = envelope.get("prompt") {
        println!("\n{}", prompt);
    }
}

/// One row per leaf, nested keys joined with dots.
fn push_flattened(builder: &mut Builder, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                push_flattened(builder, &format!("{prefix}.{key}"), val);
            }
        }
        _ => builder.push_record([prefix.to_string(), format_value(value)]),
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Campo", "Valor"]);
    for (key, val) in map {
        push_flattened(&mut builder, key, val);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(vazio)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
