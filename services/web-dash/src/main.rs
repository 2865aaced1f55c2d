// services/web-dash/src/main.rs
//
// NIRIKSHAN browser dashboard
//
// Run with: NIRIKSHAN_API_URL=http://127.0.0.1:8000 trunk serve
//

fn main() {
    web_dash::mount();
}
