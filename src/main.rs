fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    vm_gallery::mount();
}
