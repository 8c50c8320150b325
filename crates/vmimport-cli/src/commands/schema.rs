use clap::Args;

#[derive(Args)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        println!("{}", self.run()?);
        Ok(())
    }

    /// OpenAPI document as pretty JSON
    pub fn run(&self) -> anyhow::Result<String> {
        Ok(vmimport_types::schema::document().to_pretty_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_valid_json() {
        let json = SchemaCommand {}.run().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["components"]["schemas"]["StatusCondition"].is_object());
        assert_eq!(value["info"]["title"], "VM Import Validation");
    }
}
