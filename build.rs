fn main() {
    // Rebuild when a migration changes so `sqlx::migrate!()` embeds the new set
    println!("cargo:rerun-if-changed=migrations");
}
