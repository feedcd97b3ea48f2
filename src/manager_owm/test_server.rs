use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::Value;

/// Canned OpenWeatherMap answers served from an ephemeral port on localhost
#[derive(Clone, Default)]
pub struct CannedOwm {
    routes: Vec<(&'static str, u16, Value)>,
}

impl CannedOwm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers GET requests on `path` with `status` and `body`, whatever the query
    pub fn route(mut self, path: &'static str, status: u16, body: Value) -> Self {
        self.routes.push((path, status, body));
        self
    }

    /// Starts serving and returns the base url to hand to `Owm::new`.
    /// Must be called from within a running actix system.
    pub fn start(self) -> String {
        let routes = self.routes;
        let server = HttpServer::new(move || {
            let mut app = App::new();
            for (path, status, body) in routes.clone() {
                app = app.route(path, web::get().to(move || {
                    let body = body.clone();
                    async move {
                        HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(body)
                    }
                }));
            }
            app
        })
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .unwrap();

        let port = server.addrs()[0].port();
        actix_web::rt::spawn(server.run());

        format!("http://127.0.0.1:{}", port)
    }
}
