fn main() {
    // Stamp the build time so the frame's about box can show it
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    println!("cargo:rustc-env=PARTICLEPICK_BUILD_DATE={}", stamp);
    println!("cargo:rerun-if-changed=build.rs");
}
