fn main() -> anyhow::Result<()> {
    eq_inventory_search::cli::run()
}
