use rocket::Route;

mod admin;
mod ballot;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(ballot::routes());
    routes.extend(admin::routes());
    routes
}
