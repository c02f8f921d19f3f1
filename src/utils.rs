/// Hide a password while it is typed, one dot per character
pub fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
