//! Cross-layer event namespace.
//!
//! Any event that passes between layers must be one of these. The high byte
//! names the destination layer, the low byte a sub-event within it.

/// Selects the destination layer.
pub const EVT_MASK: u16 = 0xFF00;

/// Selects the sub-event within a layer.
pub const SUB_EVT_MASK: u16 = 0x00FF;

// To the upper layers (BTU).
pub const EVT_TO_BTU_L2C_EVT: u16 = 0x0900;
pub const EVT_TO_BTU_HCI_EVT: u16 = 0x1000;
pub const EVT_TO_BTU_HCI_BR_EDR_EVT: u16 = EVT_TO_BTU_HCI_EVT;
pub const EVT_TO_BTU_HCI_AMP1_EVT: u16 = 0x0001 | EVT_TO_BTU_HCI_EVT;
pub const EVT_TO_BTU_HCI_AMP2_EVT: u16 = 0x0002 | EVT_TO_BTU_HCI_EVT;
pub const EVT_TO_BTU_HCI_AMP3_EVT: u16 = 0x0003 | EVT_TO_BTU_HCI_EVT;
pub const EVT_TO_BTU_HCI_ACL: u16 = 0x1100;
pub const EVT_TO_BTU_HCI_SCO: u16 = 0x1200;
pub const EVT_TO_BTU_HCIT_ERR: u16 = 0x1300;
pub const EVT_TO_BTU_SP_EVT: u16 = 0x1400;
pub const EVT_TO_BTU_SP_DATA: u16 = 0x1500;
pub const EVT_TO_BTU_HCI_CMD: u16 = 0x1600;
pub const EVT_TO_BTU_HCI_ISO: u16 = 0x1700;
pub const EVT_TO_BTU_L2C_SEG_XMIT: u16 = 0x1900;

// To the link manager (LM).
pub const EVT_TO_LM_HCI_CMD: u16 = 0x2000;
pub const EVT_TO_LM_HCI_ACL: u16 = 0x2100;
pub const EVT_TO_LM_HCI_SCO: u16 = 0x2200;
pub const EVT_TO_LM_HCIT_ERR: u16 = 0x2300;
pub const EVT_TO_LM_LC_EVT: u16 = 0x2400;
pub const EVT_TO_LM_LC_LMP: u16 = 0x2500;
pub const EVT_TO_LM_LC_ACL: u16 = 0x2600;
pub const EVT_TO_LM_LC_ACL_TX: u16 = 0x2800;
pub const EVT_TO_LM_LC_LMPC_TX: u16 = 0x2900;
pub const EVT_TO_LM_LOCAL_ACL_LB: u16 = 0x2a00;
pub const EVT_TO_LM_DIAG: u16 = 0x2c00;
pub const EVT_TO_LM_HCI_ISO: u16 = 0x2d00;

pub const EVT_TO_BTM_CMDS: u16 = 0x2f00;
pub const EVT_TO_BTM_PM_MDCHG_EVT: u16 = 0x0001 | EVT_TO_BTM_CMDS;

// NFC.
pub const EVT_TO_NFC_NCI: u16 = 0x4000;
pub const EVT_TO_NFC_INIT: u16 = 0x4100;
pub const EVT_TO_NCI_LP: u16 = 0x4200;
pub const EVT_TO_NFC_ERR: u16 = 0x4300;

// HCI serial transport unit.
pub const EVT_HCISU: u16 = 0x5000;
pub const EVT_TO_HCISU_RECONFIG_EVT: u16 = 0x0001 | EVT_HCISU;
pub const EVT_TO_HCISU_UPDATE_BAUDRATE_EVT: u16 = 0x0002 | EVT_HCISU;
pub const EVT_TO_HCISU_LP_ENABLE_EVT: u16 = 0x0003 | EVT_HCISU;
pub const EVT_TO_HCISU_LP_DISABLE_EVT: u16 = 0x0004 | EVT_HCISU;
pub const EVT_TO_HCISU_H5_RESET_EVT: u16 = 0x0009 | EVT_HCISU;

pub const EVT_BTU_IPC_EVT: u16 = 0x9000;

// Interface layer.
pub const EVT_BTIF: u16 = 0xA000;
pub const EVT_CONTEXT_SWITCH_EVT: u16 = 0x0001 | EVT_BTIF;

/// Destination-layer part of an event.
pub fn event_layer(event: u16) -> u16 {
    event & EVT_MASK
}

/// Sub-event part of an event.
pub fn sub_event(event: u16) -> u8 {
    (event & SUB_EVT_MASK) as u8
}

/// Human-readable name of the layer an event is addressed to.
pub fn layer_name(event: u16) -> &'static str {
    match event_layer(event) {
        EVT_TO_BTU_L2C_EVT => "BTU_L2C",
        EVT_TO_BTU_HCI_EVT => "BTU_HCI_EVT",
        EVT_TO_BTU_HCI_ACL => "BTU_HCI_ACL",
        EVT_TO_BTU_HCI_SCO => "BTU_HCI_SCO",
        EVT_TO_BTU_HCIT_ERR => "BTU_HCIT_ERR",
        EVT_TO_BTU_SP_EVT | EVT_TO_BTU_SP_DATA => "BTU_SP",
        EVT_TO_BTU_HCI_CMD => "BTU_HCI_CMD",
        EVT_TO_BTU_HCI_ISO => "BTU_HCI_ISO",
        EVT_TO_BTU_L2C_SEG_XMIT => "BTU_L2C_SEG_XMIT",
        0x2000..=0x2e00 => "LM",
        EVT_TO_BTM_CMDS => "BTM",
        0x4000..=0x4a00 => "NFC",
        EVT_HCISU => "HCISU",
        0x5100..=0x5f00 => "AMP_DATA",
        EVT_BTU_IPC_EVT => "BTU_IPC",
        EVT_BTIF => "BTIF",
        _ => "UNKNOWN",
    }
}

/// Returns true if the event is addressed to the link manager.
pub fn is_to_lm(event: u16) -> bool {
    (EVT_TO_LM_HCI_CMD..=EVT_TO_LM_HCI_ISO).contains(&event_layer(event))
}
