//! Workout file checks shared by the build script and the runner tests
//!
//! Mirrors what the loader and compiler accept, on a raw `toml::Value`, so
//! a default workout that passes the build always loads at startup.

/// Upper bound on compiled steps, same as `cadence_core::sequence::MAX_STEPS`
pub const MAX_STEPS: u64 = 10_000;

/// Check a parsed workout file, returning one message per problem
pub fn validate_workout_value(workout: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_string_or_absent(workout.get("title")) {
        errors.push("'title' must be a string".to_string());
    }
    validate_runner(workout, &mut errors);
    validate_sections(workout, &mut errors);

    errors
}

/// Check the optional [runner] table
fn validate_runner(workout: &toml::Value, errors: &mut Vec<String>) {
    let Some(runner) = workout.get("runner") else {
        return;
    };
    if !runner.is_table() {
        errors.push("'runner' must be a table".to_string());
        return;
    }

    match runner.get("tick_interval_ms") {
        None => {}
        Some(toml::Value::Integer(n)) if *n > 0 => {}
        Some(_) => errors.push("[runner] 'tick_interval_ms' must be > 0".to_string()),
    }
    if !matches!(runner.get("autostart"), None | Some(toml::Value::Boolean(_))) {
        errors.push("[runner] 'autostart' must be true or false".to_string());
    }
}

/// Check every [[section]] and its exercises
fn validate_sections(workout: &toml::Value, errors: &mut Vec<String>) {
    let sections = match workout.get("section") {
        Some(toml::Value::Array(sections)) if !sections.is_empty() => sections,
        _ => {
            errors.push("Missing [[section]] - at least one section is required".to_string());
            return;
        }
    };

    let mut total_steps: u64 = 0;

    for (i, section) in sections.iter().enumerate() {
        match section.get("type").and_then(|t| t.as_str()) {
            Some("rest") => {
                if !is_string(section.get("name")) {
                    errors.push(format!("section {} (rest) needs a 'name'", i));
                }
                if !is_positive(section.get("duration")) {
                    errors.push(format!("section {} (rest) needs 'duration' in 1..=u32::MAX", i));
                }
                if !is_string_or_absent(section.get("description")) {
                    errors.push(format!("section {} (rest) 'description' must be a string", i));
                }
                total_steps += 1;
            }
            Some("group") => {
                if !is_string(section.get("label")) {
                    errors.push(format!("section {} (group) needs a 'label'", i));
                }
                let rounds = match section.get("rounds") {
                    None => 1,
                    Some(toml::Value::Integer(n)) if is_u32_positive(*n) => *n as u64,
                    Some(_) => {
                        errors.push(format!("section {} (group) 'rounds' must be >= 1", i));
                        0
                    }
                };
                let exercises = validate_exercises(i, section, errors);
                total_steps = total_steps.saturating_add(rounds.saturating_mul(exercises));
            }
            Some(other) => {
                errors.push(format!("section {} has unknown type '{}'", i, other));
            }
            None => {
                errors.push(format!("section {} missing 'type' (group or rest)", i));
            }
        }
    }

    if total_steps > MAX_STEPS {
        errors.push(format!(
            "workout expands to {} steps (limit {})",
            total_steps, MAX_STEPS
        ));
    }
}

/// Check the exercises of one group section, returning how many it has
fn validate_exercises(section_index: usize, section: &toml::Value, errors: &mut Vec<String>) -> u64 {
    let exercises = match section.get("exercise") {
        Some(toml::Value::Array(exercises)) if !exercises.is_empty() => exercises,
        _ => {
            errors.push(format!("section {} has no [[section.exercise]]", section_index));
            return 0;
        }
    };

    for (j, exercise) in exercises.iter().enumerate() {
        let at = format!("section {} exercise {}", section_index, j);

        if !is_string(exercise.get("name")) {
            errors.push(format!("{} needs a 'name'", at));
        }
        if !is_string_or_absent(exercise.get("description")) {
            errors.push(format!("{} 'description' must be a string", at));
        }

        match exercise.get("kind").and_then(|k| k.as_str()) {
            Some("timed") => {
                if !is_positive(exercise.get("duration")) {
                    errors.push(format!("{} is timed and needs 'duration' in 1..=u32::MAX", at));
                }
                if exercise.get("reps").is_some() {
                    errors.push(format!("{} is timed and must not set 'reps'", at));
                }
            }
            Some("reps") => {
                match exercise.get("reps") {
                    Some(toml::Value::Integer(n)) if is_u32_positive(*n) => {}
                    Some(toml::Value::String(s)) if !s.trim().is_empty() => {}
                    _ => errors.push(format!("{} is reps and needs a non-empty 'reps'", at)),
                }
                if exercise.get("duration").is_some() {
                    errors.push(format!("{} is reps and must not set 'duration'", at));
                }
            }
            _ => errors.push(format!("{} 'kind' must be 'timed' or 'reps'", at)),
        }
    }

    exercises.len() as u64
}

fn is_u32_positive(n: i64) -> bool {
    n > 0 && n <= i64::from(u32::MAX)
}

fn is_positive(value: Option<&toml::Value>) -> bool {
    matches!(value, Some(toml::Value::Integer(n)) if is_u32_positive(*n))
}

fn is_string(value: Option<&toml::Value>) -> bool {
    matches!(value, Some(toml::Value::String(_)))
}

fn is_string_or_absent(value: Option<&toml::Value>) -> bool {
    matches!(value, None | Some(toml::Value::String(_)))
}
