use circuit_timer_core::SettingsStore;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open_default()?.load_or_default();
    let config = settings.workout_config();
    let summary = config.summary();

    if json {
        let out = serde_json::json!({
            "workTime": config.work_duration,
            "restTime": config.rest_duration,
            "setsPerExercise": config.sets_per_exercise,
            "circuits": config.circuit_count,
            "exercises": config.exercises,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Work {}s \u{2022} Rest {}s \u{2022} {} sets \u{2022} {} circuits",
        config.work_duration, config.rest_duration, config.sets_per_exercise, config.circuit_count
    );
    for (i, ex) in config.exercises.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, ex.name, ex.description);
    }
    println!("Active exercises:   {}", summary.active_exercises);
    println!("Total sets:         {}", summary.total_sets);
    println!(
        "Estimated duration: {}min ({}s)",
        summary.estimated_minutes, summary.total_secs
    );
    Ok(())
}
