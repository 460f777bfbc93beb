pub struct HomePage;

impl HomePage {
    pub const TITLE: &'static str = "Home Page";
    pub const WELCOME: &'static str =
        "Welcome to NexMedis, your trusted healthcare management system.";
}
