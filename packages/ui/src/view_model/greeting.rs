use store::{Role, Session};

#[derive(Clone, Debug, PartialEq)]
pub struct GreetingView {
    pub headline: String,
    pub role_label: String,
}

pub fn greeting(session: &Session) -> GreetingView {
    let name = match session.role {
        Role::Doctor => format!("Dr. {}", session.full_name),
        _ => session.full_name.clone(),
    };
    GreetingView {
        headline: format!("Welcome, {name}"),
        role_label: session.role.label().to_string(),
    }
}
