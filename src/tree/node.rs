use crate::context::{KspType, PcParams, PcType};
use crate::core::address::Address;
use crate::core::props::MatProps;

/// One solver stage in the configuration tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigNode {
    pub address: Address,
    pub props: MatProps,
    pub ksp_type: KspType,
    pub pc: PcParams,
}

impl ConfigNode {
    pub fn new(address: Address, props: MatProps, ksp_type: KspType, pc: PcParams) -> Self {
        Self { address, props, ksp_type, pc }
    }

    pub fn pc_type(&self) -> PcType {
        self.pc.pc_type()
    }

    /// Declared number of sub-solvers.
    pub fn fan_out(&self) -> usize {
        self.pc.fan_out()
    }
}
