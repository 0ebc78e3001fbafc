fn main() {
    mistral_provision::app::cli::run();
}
