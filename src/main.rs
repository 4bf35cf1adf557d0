fn main() {
    record_scanner::cli::run();
}
