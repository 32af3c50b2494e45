use salespulse_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
        String::new(),
        "What to do next:".to_string(),
    ];

    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        lines.extend(
            error
                .recovery_steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("  {}. {step}", index + 1)),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use salespulse_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_numbered_recovery_steps() {
        let error = ClientError::entity_not_found("S-9");
        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    entity_not_found"));
        assert!(rendered.contains("  Details:  No entity with id `S-9`"));
        assert!(rendered.contains("  1. Run `salespulse classify <path>` to list entity ids."));
        assert!(rendered.contains("  2. Retry with an id from that listing."));
    }

    #[test]
    fn missing_steps_fall_back_to_retry() {
        let error = ClientError::internal_serialization("boom");
        assert!(render_error(&error).ends_with("  1. Retry the command."));
    }
}
