use zxcvbn::zxcvbn;

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: u8 = 2;

/// Checks a registration password against the length, numeric-only and
/// guessability rules. `user_inputs` are the other registration fields, so a
/// password built from the username scores as weak.
pub fn validate_password_strength(password: &str, user_inputs: &[&str]) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_LENGTH {
        problems.push(format!(
            "This password is too short. It must contain at least {} characters.",
            MIN_LENGTH
        ));
    }

    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_string());
    }

    if !password.is_empty() {
        let estimate = zxcvbn(password, user_inputs);
        let score = estimate.score() as u8;

        if score < MIN_STRENGTH_SCORE {
            tracing::debug!(score, "Rejected weak password");
            problems.push("This password is too common.".to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
