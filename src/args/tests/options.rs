use super::*;

#[test]
fn parse_args_full_request() -> AppResult<()> {
    let args = parse_test_args([
        "conreq",
        "https://api.example.com/orders",
        "-X",
        "post",
        "-c",
        "5",
        "-d",
        "{\"item\":1}",
        "--same-request-id",
        "--request-id-header",
        "X-Correlation-ID",
        "--delay",
        "100ms",
        "--timeout",
        "5s",
        "--no-body",
        "--json",
        "-o",
        "out.json",
        "--stream",
        "-v",
    ])?;

    let checks = [
        (
            matches!(args.method, HttpMethod::Post),
            "Expected HttpMethod::Post",
        ),
        (args.concurrent.get() == 5, "Unexpected concurrent"),
        (
            args.data.as_deref() == Some("{\"item\":1}"),
            "Unexpected data",
        ),
        (args.same_request_id, "Expected same_request_id"),
        (
            args.request_id_header == "X-Correlation-ID",
            "Unexpected request_id_header",
        ),
        (args.delay == Duration::from_millis(100), "Unexpected delay"),
        (args.timeout == Duration::from_secs(5), "Unexpected timeout"),
        (args.no_body, "Expected no_body"),
        (args.json, "Expected json"),
        (args.output.as_deref() == Some("out.json"), "Unexpected output"),
        (args.stream, "Expected stream"),
        (args.verbose, "Expected verbose"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_method_is_case_insensitive() -> AppResult<()> {
    for (raw, expected) in [
        ("DELETE", HttpMethod::Delete),
        ("Options", HttpMethod::Options),
        ("head", HttpMethod::Head),
        ("PATCH", HttpMethod::Patch),
        ("put", HttpMethod::Put),
    ] {
        let args = parse_test_args(["conreq", "http://localhost", "-X", raw])?;
        if args.method != expected {
            return Err(AppError::validation(format!(
                "Unexpected method for {}: {:?}",
                raw, args.method
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_args_rejects_unknown_method() -> AppResult<()> {
    if parse_test_args(["conreq", "http://localhost", "-X", "TRACE"]).is_ok() {
        return Err(AppError::validation("Expected TRACE to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_concurrency_bounds() -> AppResult<()> {
    for bad in ["0", "6", "-1", "ten"] {
        if parse_test_args(["conreq", "http://localhost", "-c", bad]).is_ok() {
            return Err(AppError::validation(format!(
                "Expected concurrency '{}' to be rejected",
                bad
            )));
        }
    }
    for good in ["1", "3", "5"] {
        let args = parse_test_args(["conreq", "http://localhost", "-c", good])?;
        if args.concurrent.get().to_string() != good {
            return Err(AppError::validation(format!(
                "Unexpected concurrency for {}",
                good
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_timeout() -> AppResult<()> {
    if parse_test_args(["conreq", "http://localhost", "--timeout", "0s"]).is_ok() {
        return Err(AppError::validation("Expected zero timeout to be rejected"));
    }
    Ok(())
}

#[test]
fn request_count_try_from() -> AppResult<()> {
    if RequestCount::try_from(0_u64).is_ok() || RequestCount::try_from(6_u64).is_ok() {
        return Err(AppError::validation("Expected out of range counts to fail"));
    }
    let count = RequestCount::try_from(4_u64)?;
    if count.get() != 4 {
        return Err(AppError::validation("Unexpected count"));
    }
    Ok(())
}
