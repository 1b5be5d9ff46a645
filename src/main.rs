#[actix_web::main]
async fn main() -> std::io::Result<()> {
    caseforge_lib::run().await
}
