//! Products, resources and capacity limits of the furniture workshop.
//!
//! Everything here is plain data fixed for the duration of a run. The
//! [`Resource`] enum lets the formulator and the report walk the three
//! capacity constraints uniformly instead of spelling each one out.

use std::fmt;

/// A shop resource consumed by production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Carpentry,
    Finishing,
    Wood,
}

impl Resource {
    /// All resources, in report order.
    pub const ALL: [Resource; 3] = [Resource::Carpentry, Resource::Finishing, Resource::Wood];

    /// Unit of measure, as printed in reports.
    pub fn unit(&self) -> &'static str {
        match self {
            Resource::Carpentry | Resource::Finishing => "hours",
            Resource::Wood => "units",
        }
    }

    /// Short unit suffix used in the setup lines (`100h`, `50 units`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Resource::Carpentry | Resource::Finishing => "h",
            Resource::Wood => " units",
        }
    }

    /// Name of the capacity constraint on this resource.
    pub fn constraint_name(&self) -> &'static str {
        match self {
            Resource::Carpentry => "Carpentry_Hours_Constraint",
            Resource::Finishing => "Finishing_Hours_Constraint",
            Resource::Wood => "Wood_Units_Constraint",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Carpentry => write!(f, "Carpentry"),
            Resource::Finishing => write!(f, "Finishing"),
            Resource::Wood => write!(f, "Wood"),
        }
    }
}

/// A product with its per-unit resource usage and profit.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub carpentry_hours: f64,
    pub finishing_hours: f64,
    pub wood_units: f64,
    pub profit: f64,
}

impl Product {
    /// Chair A: carpentry heavy, light on wood.
    pub fn chair_a() -> Self {
        Self {
            name: "Chair A".into(),
            carpentry_hours: 2.0,
            finishing_hours: 1.0,
            wood_units: 0.5,
            profit: 20.0,
        }
    }

    /// Chair B: finishing heavy, one full unit of wood.
    pub fn chair_b() -> Self {
        Self {
            name: "Chair B".into(),
            carpentry_hours: 1.0,
            finishing_hours: 1.5,
            wood_units: 1.0,
            profit: 15.0,
        }
    }

    /// Amount of `resource` one unit of this product consumes.
    pub fn usage(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Carpentry => self.carpentry_hours,
            Resource::Finishing => self.finishing_hours,
            Resource::Wood => self.wood_units,
        }
    }

    /// Name of the decision variable holding this product's quantity,
    /// e.g. `Chair_A_Quantity`.
    pub fn quantity_variable_name(&self) -> String {
        format!("{}_Quantity", self.name.replace(' ', "_"))
    }
}

/// Maximum available capacity of each resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceLimits {
    pub carpentry_hours: f64,
    pub finishing_hours: f64,
    pub wood_units: f64,
}

impl ResourceLimits {
    /// Capacity of the workshop in the standard planning scenario.
    pub const DEFAULT: Self = Self {
        carpentry_hours: 100.0,
        finishing_hours: 80.0,
        wood_units: 50.0,
    };

    pub fn limit(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Carpentry => self.carpentry_hours,
            Resource::Finishing => self.finishing_hours,
            Resource::Wood => self.wood_units,
        }
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The full planning problem: two products sharing three resources.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionProblem {
    pub name: String,
    pub products: [Product; 2],
    pub limits: ResourceLimits,
}

impl ProductionProblem {
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            name: "Furniture_Production_Planning".into(),
            products: [Product::chair_a(), Product::chair_b()],
            limits,
        }
    }

    /// Resource consumed by producing `quantities` of the products, in
    /// product order.
    pub fn usage(&self, resource: Resource, quantities: &[f64; 2]) -> f64 {
        self.products
            .iter()
            .zip(quantities)
            .map(|(product, quantity)| product.usage(resource) * quantity)
            .sum()
    }

    /// Total profit of producing `quantities`.
    pub fn profit(&self, quantities: &[f64; 2]) -> f64 {
        self.products
            .iter()
            .zip(quantities)
            .map(|(product, quantity)| product.profit * quantity)
            .sum()
    }
}

impl Default for ProductionProblem {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_problem_data() {
        let problem = ProductionProblem::default();
        assert_eq!(problem.products[0].name, "Chair A");
        assert_eq!(problem.products[1].name, "Chair B");
        assert_eq!(problem.limits.limit(Resource::Carpentry), 100.0);
        assert_eq!(problem.limits.limit(Resource::Finishing), 80.0);
        assert_eq!(problem.limits.limit(Resource::Wood), 50.0);
    }

    #[test]
    fn test_product_usage_per_resource() {
        let chair = Product::chair_a();
        assert_eq!(chair.usage(Resource::Carpentry), 2.0);
        assert_eq!(chair.usage(Resource::Finishing), 1.0);
        assert_eq!(chair.usage(Resource::Wood), 0.5);
    }

    #[test]
    fn test_quantity_variable_name() {
        assert_eq!(Product::chair_a().quantity_variable_name(), "Chair_A_Quantity");
        assert_eq!(Product::chair_b().quantity_variable_name(), "Chair_B_Quantity");
    }

    #[test]
    fn test_problem_usage_and_profit() {
        let problem = ProductionProblem::default();
        let quantities = [35.0, 30.0];

        assert_eq!(problem.usage(Resource::Carpentry, &quantities), 100.0);
        assert_eq!(problem.usage(Resource::Finishing, &quantities), 80.0);
        assert_eq!(problem.usage(Resource::Wood, &quantities), 47.5);
        assert_eq!(problem.profit(&quantities), 1150.0);
    }
}
