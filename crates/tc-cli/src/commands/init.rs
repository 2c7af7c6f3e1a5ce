use std::path::Path;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    let written = tc_data::write_template(dir).map_err(|e| e.to_string())?;

    println!("Created data directory '{name}' in {name}/");
    for path in &written {
        if let Some(file) = path.file_name() {
            println!("  {}", file.to_string_lossy());
        }
    }
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  tc check                      # Load and validate the tables");
    println!("  tc overland --zone 'Old Road' # Roll a day of travel");
    println!("  tc play                       # Interactive GM session");

    Ok(())
}
