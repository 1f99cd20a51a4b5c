use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
}

impl Health {
    pub fn up() -> Self { Self { status: "ok", database: "up" } }

    pub fn degraded() -> Self { Self { status: "degraded", database: "down" } }
}
