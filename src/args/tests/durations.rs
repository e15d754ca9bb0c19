use super::*;

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("500ms", Duration::from_millis(500)),
        ("2s", Duration::from_secs(2)),
        ("3", Duration::from_secs(3)),
        ("1m", Duration::from_secs(60)),
        ("1h", Duration::from_secs(3600)),
        ("250us", Duration::from_micros(250)),
        ("1m30s", Duration::from_secs(90)),
        ("1s500ms", Duration::from_millis(1500)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_zero_and_garbage() -> AppResult<()> {
    for input in ["0s", "", "ms", "10x", "1.5s", "5 s"] {
        if parse_duration_arg(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected Err for duration '{}'",
                input
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_delay_accepts_zero() -> AppResult<()> {
    for input in ["0", "0s", "0ms"] {
        if parse_delay_arg(input)? != Duration::ZERO {
            return Err(AppError::validation(format!(
                "Expected zero delay for '{}'",
                input
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_overflow() -> AppResult<()> {
    let huge = format!("{}h", u64::MAX);
    if parse_delay_arg(&huge).is_ok() {
        return Err(AppError::validation("Expected overflow error"));
    }
    Ok(())
}
