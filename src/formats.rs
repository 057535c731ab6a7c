pub mod zigbee_ota;
