//! Product commands - create, inspect, compose and cost products.

use crate::{
    cli::{ActivityLineArgs, MaterialLineArgs, ProductArgs, ProductCommand},
    core::{
        composition::{ActivityLineInput, MaterialLineInput},
        product::NewProduct,
        registry::CostTrax,
        report::{format_cost_summary, format_product_sheet},
    },
    errors::{Error, Result},
};

impl From<ProductArgs> for NewProduct {
    fn from(args: ProductArgs) -> Self {
        Self::new(args.code, args.name, args.description, args.base_unit)
    }
}

impl From<MaterialLineArgs> for MaterialLineInput {
    fn from(args: MaterialLineArgs) -> Self {
        Self {
            material_code: args.material,
            consumption: args.consumption,
            consumption_unit: args.unit,
            production_ratio: args.ratio,
            production_unit: args.production_unit,
            waste: args.waste,
            cost_per_unit: args.cost,
        }
    }
}

impl From<ActivityLineArgs> for ActivityLineInput {
    fn from(args: ActivityLineArgs) -> Self {
        Self {
            activity_code: args.activity,
            consumption: args.consumption,
            activity_unit: args.unit,
            production_ratio: args.ratio,
            production_unit: args.production_unit,
            cost_per_unit: args.cost,
        }
    }
}

/// Runs a `product` subcommand.
pub async fn run_product(trax: &CostTrax, command: ProductCommand) -> Result<String> {
    match command {
        ProductCommand::Add(args) => {
            let sheet = trax.add_product(&args.into()).await?;
            Ok(format!(
                "✅ Product {} '{}' created.",
                sheet.code(),
                sheet.product.name
            ))
        }
        ProductCommand::List => {
            let sheets = trax.products().await?;
            if sheets.is_empty() {
                return Ok("No products have been defined yet.".to_string());
            }
            Ok(sheets
                .iter()
                .map(|sheet| {
                    format!(
                        "Product {}: {} ({} materials, {} activities)",
                        sheet.code(),
                        sheet.product.name,
                        sheet.bill_of_materials.len(),
                        sheet.bill_of_activities.len()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        ProductCommand::Show { code } => {
            let sheet = trax
                .search(code)
                .await?
                .ok_or(Error::ProductNotFound { code })?;
            let materials = trax.materials().await?;
            let activities = trax.activities().await?;
            Ok(format_product_sheet(&sheet, &materials, &activities))
        }
        ProductCommand::AddMaterial(args) => {
            let product_code = args.product;
            let line = trax.add_material_line(product_code, &args.into()).await?;
            Ok(format!(
                "✅ Material {} stored on product {product_code}.",
                line.material_code
            ))
        }
        ProductCommand::AddActivity(args) => {
            let product_code = args.product;
            let line = trax.add_activity_line(product_code, &args.into()).await?;
            Ok(format!(
                "✅ Activity {} stored on product {product_code}.",
                line.activity_code
            ))
        }
        ProductCommand::Cost { code } => Ok(format_cost_summary(&trax.compute_cost(code).await?)),
    }
}
