//! Read-only lookup service over registry records.
//!
//! Records reference each other by id. The directory holds each record once,
//! indexed by key, and resolves references on demand.

use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Allowance, AllowanceType, Company, Employee, Region};

/// An employee together with the company and region it resolves to.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    /// The employee.
    pub employee: &'a Employee,
    /// The employee's company.
    pub company: &'a Company,
    /// The company's region.
    pub region: &'a Region,
}

/// An arena of regions, companies, employees and allowances indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    regions: HashMap<String, Region>,
    companies: HashMap<String, Company>,
    employees: HashMap<String, Employee>,
    allowance_types: HashMap<String, AllowanceType>,
    allowances: Vec<Allowance>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a region.
    pub fn insert_region(&mut self, region: Region) {
        self.regions.insert(region.id.clone(), region);
    }

    /// Adds or replaces a company.
    pub fn insert_company(&mut self, company: Company) {
        self.companies.insert(company.id.clone(), company);
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Adds or replaces an allowance type.
    pub fn insert_allowance_type(&mut self, allowance_type: AllowanceType) {
        self.allowance_types
            .insert(allowance_type.id.clone(), allowance_type);
    }

    /// Adds an allowance assignment.
    pub fn insert_allowance(&mut self, allowance: Allowance) {
        self.allowances.push(allowance);
    }

    /// Looks up an employee.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Looks up a company.
    pub fn company(&self, company_id: &str) -> EngineResult<&Company> {
        self.companies
            .get(company_id)
            .ok_or_else(|| EngineError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }

    /// Looks up a region.
    pub fn region(&self, region_id: &str) -> EngineResult<&Region> {
        self.regions
            .get(region_id)
            .ok_or_else(|| EngineError::RegionNotFound {
                region_id: region_id.to_string(),
            })
    }

    /// Looks up an allowance type.
    pub fn allowance_type(&self, allowance_type_id: &str) -> Option<&AllowanceType> {
        self.allowance_types.get(allowance_type_id)
    }

    /// The employee's allowance assignments for one month, in insertion order.
    pub fn allowances_for<'a>(
        &'a self,
        employee_id: &'a str,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &'a Allowance> + 'a {
        self.allowances
            .iter()
            .filter(move |a| a.employee_id == employee_id && a.year == year && a.month == month)
    }

    /// Resolves an employee to its company and region.
    ///
    /// # Errors
    ///
    /// * [`EngineError::EmployeeNotFound`] / [`EngineError::CompanyNotFound`] /
    ///   [`EngineError::RegionNotFound`] for dangling references.
    /// * [`EngineError::RegionMissing`] if the company has no region assigned.
    pub fn placement(&self, employee_id: &str) -> EngineResult<Placement<'_>> {
        let employee = self.employee(employee_id)?;
        let company = self.company(&employee.company_id)?;
        let region_id = company
            .region_id
            .as_deref()
            .ok_or_else(|| EngineError::RegionMissing {
                company_id: company.id.clone(),
            })?;
        let region = self.region(region_id)?;

        Ok(Placement {
            employee,
            company,
            region,
        })
    }
}
