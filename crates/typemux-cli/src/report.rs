use serde::Serialize;
use typemux_build::Plan;
use typemux_core::DispatchCase;
use typemux_schema::model::SchemaPath;

///
/// PlanReport
///
/// JSON view of a generation plan.
///

#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub groups: Vec<GroupReport<'a>>,
    pub dropped: Vec<DroppedReport<'a>>,
    pub decode: &'a [DispatchCase],
    pub encode: &'a [DispatchCase],
}

#[derive(Debug, Serialize)]
pub struct GroupReport<'a> {
    pub name: &'a str,
    pub accessor: String,
    pub mapper: &'a str,
    pub module: &'a str,
    pub owned: &'a [SchemaPath],
    pub mapped: Vec<&'a str>,
    pub fieldless: &'a [SchemaPath],
}

#[derive(Debug, Serialize)]
pub struct DroppedReport<'a> {
    #[serde(rename = "type")]
    pub path: &'a SchemaPath,
    pub group: &'a str,
    pub owner: &'a str,
}

impl<'a> PlanReport<'a> {
    pub fn new(plan: &'a Plan) -> Self {
        let groups = plan
            .files
            .iter()
            .map(|file| GroupReport {
                name: &file.name,
                accessor: plan.groups[file.group].accessor_name(),
                mapper: &file.mapper,
                module: &file.module,
                owned: plan.ownership.owned_by(file.group),
                mapped: file.mapped_names().collect(),
                fieldless: &file.fieldless,
            })
            .collect();

        let dropped = plan
            .ownership
            .dropped()
            .iter()
            .map(|claim| DroppedReport {
                path: &claim.path,
                group: &plan.groups[claim.group].name,
                owner: &plan.groups[claim.owner].name,
            })
            .collect();

        Self {
            groups,
            dropped,
            decode: plan.tables.decode.cases(),
            encode: plan.tables.encode.cases(),
        }
    }
}
