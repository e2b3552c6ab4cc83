fn main() {
    moktashif_client_lib::run()
}
